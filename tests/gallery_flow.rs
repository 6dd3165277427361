//! End-to-end gallery flows driven through the public API: chat responses and
//! uploads publishing through the bridge while a page owns the gallery.

use std::sync::{Arc, Mutex};

use rose_studio::gallery::{AddImageOptions, GalleryBridge, GalleryOwner, GalleryView, ImageInput};
use rose_studio::net::chat::{EMPTY_REPLY, apply_chat_response};
use rose_studio::net::types::ChatResponse;
use rose_studio::net::upload::{discard_preview, publish_preview, publish_remote};
use rose_studio::state::chat::{ChatState, Sender};
use serde_json::json;

type Views = Arc<Mutex<Vec<GalleryView>>>;

fn mount(bridge: &GalleryBridge) -> (GalleryOwner, Views) {
    let views: Views = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&views);
    let owner = GalleryOwner::install(
        bridge.clone(),
        Arc::new(move |view: &GalleryView| sink.lock().expect("views").push(view.clone())),
    );
    (owner, views)
}

fn latest(views: &Views) -> GalleryView {
    views.lock().expect("views").last().cloned().expect("a published view")
}

// =============================================================
// chat
// =============================================================

#[test]
fn chat_turn_fills_gallery_and_transcript() {
    let bridge = GalleryBridge::new();
    let (_owner, views) = mount(&bridge);
    let mut chat = ChatState::with_greeting();

    let response: ChatResponse = serde_json::from_value(json!({
        "sessionId": "abc",
        "messages": [
            { "role": "assistant", "content": "Here is your render." },
            { "role": "system", "content": "render saved" }
        ],
        "artifacts": [{ "id": "a1", "url": "https://cdn/render.png", "label": "Render" }],
        "displayImages": [{ "id": "d1", "url": "https://cdn/view.png", "description": "Top view" }]
    }))
    .expect("response");

    apply_chat_response(&mut chat, &bridge, &response);

    assert_eq!(chat.session_id.as_deref(), Some("abc"));
    let senders: Vec<Sender> = chat.messages.iter().map(|m| m.sender).collect();
    assert_eq!(senders, vec![Sender::Bot, Sender::Bot, Sender::System]);

    let view = latest(&views);
    assert_eq!(view.items.len(), 2);
    assert_eq!(view.selection.index, 0);
    assert_eq!(view.current().map(|r| r.description.as_str()), Some("Top view"));
    assert_eq!(bridge.active_image_url(), "https://cdn/view.png");
}

#[test]
fn repeated_artifact_is_deduplicated() {
    let bridge = GalleryBridge::new();
    let (_owner, _views) = mount(&bridge);
    let mut chat = ChatState::default();
    let response: ChatResponse = serde_json::from_value(json!({
        "messages": [{ "content": "again" }],
        "artifacts": [{ "id": "a1", "url": "https://cdn/render.png", "label": "Render" }]
    }))
    .expect("response");

    apply_chat_response(&mut chat, &bridge, &response);
    apply_chat_response(&mut chat, &bridge, &response);

    assert_eq!(bridge.all_image_urls(), vec!["https://cdn/render.png"]);
}

#[test]
fn empty_reply_leaves_gallery_untouched() {
    let bridge = GalleryBridge::new();
    let (_owner, views) = mount(&bridge);
    let mut chat = ChatState::default();
    let response: ChatResponse = serde_json::from_value(json!({
        "messages": [],
        "displayImages": [{ "url": "https://cdn/view.png" }]
    }))
    .expect("response");

    apply_chat_response(&mut chat, &bridge, &response);

    assert_eq!(chat.messages.last().map(|m| m.content.as_str()), Some(EMPTY_REPLY));
    assert!(views.lock().expect("views").is_empty());
    assert_eq!(bridge.active_image_url(), "");
}

// =============================================================
// upload
// =============================================================

#[test]
fn upload_swaps_preview_for_remote() {
    let bridge = GalleryBridge::new();
    let (_owner, views) = mount(&bridge);

    publish_preview(&bridge, "blob:local/1", "cat.png");
    assert!(latest(&views).current().is_some_and(|r| r.is_local));

    publish_remote(&bridge, "blob:local/1", "https://cdn/cat.png", "cat.png");

    let view = latest(&views);
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.selection.active_url, "https://cdn/cat.png");
    assert_eq!(bridge.active_image_url(), "https://cdn/cat.png");
}

#[test]
fn failed_upload_falls_back_to_front_image() {
    let bridge = GalleryBridge::new();
    let (owner, _views) = mount(&bridge);
    bridge.add_items([ImageInput::from_url("https://cdn/1.png"), ImageInput::from_url("https://cdn/2.png")]);
    owner.select_index(1);
    assert_eq!(bridge.active_image_url(), "https://cdn/1.png");

    publish_preview(&bridge, "blob:local/2", "dog.png");
    discard_preview(&bridge, "blob:local/2");

    assert_eq!(bridge.all_image_urls(), vec!["https://cdn/2.png", "https://cdn/1.png"]);
    assert_eq!(bridge.active_image_url(), "https://cdn/2.png");
}

// =============================================================
// ownership
// =============================================================

#[test]
fn unmounting_the_page_disconnects_producers() {
    let bridge = GalleryBridge::new();
    let (owner, views) = mount(&bridge);
    bridge.add_image_by_url("https://cdn/1.png", AddImageOptions::described("one"));
    let published = views.lock().expect("views").len();

    drop(owner);

    assert!(!bridge.is_registered());
    assert_eq!(bridge.active_image_url(), "");
    bridge.add_image_by_url("https://cdn/2.png", AddImageOptions::default());
    assert!(bridge.items().is_empty());
    assert_eq!(views.lock().expect("views").len(), published);
}

#[test]
fn remounting_starts_from_an_empty_gallery() {
    let bridge = GalleryBridge::new();
    let (first, _views) = mount(&bridge);
    bridge.add_image_by_url("https://cdn/1.png", AddImageOptions::default());
    first.release();

    let (_second, _views) = mount(&bridge);
    assert!(bridge.items().is_empty());
    assert_eq!(bridge.active_image_url(), "");
}
