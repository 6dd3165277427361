use super::*;

#[test]
fn next_wraps_to_first() {
    assert_eq!(next_index(0, 3), 1);
    assert_eq!(next_index(2, 3), 0);
}

#[test]
fn prev_wraps_to_last() {
    assert_eq!(prev_index(1, 3), 0);
    assert_eq!(prev_index(0, 3), 2);
}

#[test]
fn navigation_on_empty_gallery_stays_at_zero() {
    assert_eq!(next_index(0, 0), 0);
    assert_eq!(prev_index(0, 0), 0);
}

// =============================================================
// empty placeholder
// =============================================================

#[test]
fn empty_view_shows_placeholder() {
    assert!(!has_images(&GalleryView::default()));
}

#[test]
fn view_with_items_shows_stage() {
    let record = crate::gallery::ImageInput::from_url("https://cdn/1.png").normalize(None).expect("record");
    let view = GalleryView { items: vec![record], ..GalleryView::default() };
    assert!(has_images(&view));
}
