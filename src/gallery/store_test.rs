use std::sync::Mutex;

use super::*;
use crate::gallery::record::ImageInput;

fn rec(url: &str) -> ImageRecord {
    ImageInput::from_url(url).normalize(None).expect("record")
}

fn originals(items: &[ImageRecord]) -> Vec<&str> {
    items.iter().map(|item| item.original.as_str()).collect()
}

// =============================================================
// GalleryMutation::apply_to
// =============================================================

#[test]
fn upsert_prepends_new_record() {
    let mut items = vec![rec("a"), rec("b")];
    GalleryMutation::Upsert(rec("c")).apply_to(&mut items);
    assert_eq!(originals(&items), vec!["c", "a", "b"]);
}

#[test]
fn upsert_moves_existing_record_to_front() {
    let mut items = vec![rec("a"), rec("b"), rec("c")];
    GalleryMutation::Upsert(rec("c")).apply_to(&mut items);
    assert_eq!(originals(&items), vec!["c", "a", "b"]);
}

#[test]
fn upsert_dedups_by_alias() {
    let mut items = Vec::new();
    let first = ImageInput {
        original: Some("A".to_owned()),
        source_id: Some("A".to_owned()),
        ..ImageInput::default()
    };
    let second = ImageInput {
        original: Some("A".to_owned()),
        thumbnail: Some("A".to_owned()),
        source_id: Some("B".to_owned()),
        ..ImageInput::default()
    };
    GalleryMutation::Upsert(first.normalize(None).expect("first")).apply_to(&mut items);
    GalleryMutation::Upsert(second.normalize(None).expect("second")).apply_to(&mut items);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].source_id, "B");
}

#[test]
fn upsert_removes_every_colliding_record() {
    let mut items = vec![
        ImageInput { original: Some("x".to_owned()), source_id: Some("s".to_owned()), ..ImageInput::default() }
            .normalize(None)
            .expect("x"),
        ImageInput { original: Some("y".to_owned()), thumbnail: Some("t".to_owned()), ..ImageInput::default() }
            .normalize(None)
            .expect("y"),
        rec("z"),
    ];
    let incoming = ImageInput {
        original: Some("new".to_owned()),
        thumbnail: Some("t".to_owned()),
        source_id: Some("s".to_owned()),
        ..ImageInput::default()
    }
    .normalize(None)
    .expect("new");
    GalleryMutation::Upsert(incoming).apply_to(&mut items);
    assert_eq!(originals(&items), vec!["new", "z"]);
}

#[test]
fn remove_matches_original_thumbnail_or_source_id() {
    let by_thumb = ImageInput { original: Some("b".to_owned()), thumbnail: Some("shared".to_owned()), ..ImageInput::default() }
        .normalize(None)
        .expect("b");
    let by_source = ImageInput { original: Some("c".to_owned()), source_id: Some("shared".to_owned()), ..ImageInput::default() }
        .normalize(None)
        .expect("c");
    let mut items = vec![rec("a"), by_thumb, by_source, rec("shared")];
    GalleryMutation::Remove("shared".to_owned()).apply_to(&mut items);
    assert_eq!(originals(&items), vec!["a"]);
}

#[test]
fn clear_and_replace() {
    let mut items = vec![rec("a")];
    GalleryMutation::Replace(vec![rec("x"), rec("y")]).apply_to(&mut items);
    assert_eq!(originals(&items), vec!["x", "y"]);
    GalleryMutation::Clear.apply_to(&mut items);
    assert!(items.is_empty());
}

#[test]
fn mutation_kind_matches_variant() {
    assert_eq!(GalleryMutation::Upsert(rec("a")).kind(), MutationKind::Upsert);
    assert_eq!(GalleryMutation::Remove("a".to_owned()).kind(), MutationKind::Remove);
    assert_eq!(GalleryMutation::Clear.kind(), MutationKind::Clear);
    assert_eq!(GalleryMutation::Replace(Vec::new()).kind(), MutationKind::Replace);
}

// =============================================================
// GalleryStore
// =============================================================

#[test]
fn apply_returns_resulting_snapshot() {
    let store = GalleryStore::new();
    let items = store.apply(GalleryMutation::Upsert(rec("a")));
    assert_eq!(originals(&items), vec!["a"]);
    assert_eq!(store.len(), 1);
    assert!(!store.is_empty());
}

#[test]
fn subscribers_receive_kind_and_items() {
    let store = GalleryStore::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let _sub = store.subscribe(Arc::new(move |kind: MutationKind, items: &[ImageRecord]| {
        sink.lock().expect("seen").push((kind, items.len()));
    }));

    store.apply(GalleryMutation::Upsert(rec("a")));
    store.apply(GalleryMutation::Upsert(rec("b")));
    store.apply(GalleryMutation::Clear);

    let seen = seen.lock().expect("seen").clone();
    assert_eq!(
        seen,
        vec![(MutationKind::Upsert, 1), (MutationKind::Upsert, 2), (MutationKind::Clear, 0)]
    );
}

#[test]
fn dropping_subscription_unsubscribes() {
    let store = GalleryStore::new();
    let count = Arc::new(AtomicU64::new(0));
    let counter = Arc::clone(&count);
    let sub = store.subscribe(Arc::new(move |_: MutationKind, _: &[ImageRecord]| {
        counter.fetch_add(1, Ordering::Relaxed);
    }));
    assert_eq!(store.subscriber_count(), 1);

    store.apply(GalleryMutation::Clear);
    drop(sub);
    store.apply(GalleryMutation::Clear);

    assert_eq!(count.load(Ordering::Relaxed), 1);
    assert_eq!(store.subscriber_count(), 0);
}

#[test]
fn subscriber_may_read_store_during_notification() {
    let store = GalleryStore::new();
    let observed = Arc::new(Mutex::new(0_usize));
    let reader = store.clone();
    let sink = Arc::clone(&observed);
    let _sub = store.subscribe(Arc::new(move |_: MutationKind, _: &[ImageRecord]| {
        *sink.lock().expect("observed") = reader.len();
    }));
    store.apply(GalleryMutation::Upsert(rec("a")));
    assert_eq!(*observed.lock().expect("observed"), 1);
}

#[test]
fn independent_stores_do_not_share_items() {
    let a = GalleryStore::new();
    let b = GalleryStore::new();
    a.apply(GalleryMutation::Upsert(rec("a")));
    assert!(b.is_empty());
    assert!(!a.ptr_eq(&b));
    assert!(a.ptr_eq(&a.clone()));
}

#[test]
fn with_items_seeds_collection_without_notifying() {
    let store = GalleryStore::with_items(vec![rec("a"), rec("b")]);
    assert_eq!(originals(&store.items()), vec!["a", "b"]);
}
