use super::*;

// =============================================================
// ChatRequest
// =============================================================

#[test]
fn chat_request_serializes_camel_case_without_image() {
    let req = ChatRequest { message: "hi".to_owned(), session_id: None, image: None };
    let value = serde_json::to_value(&req).expect("serialize");
    assert_eq!(value, serde_json::json!({ "message": "hi", "sessionId": null }));
}

#[test]
fn chat_request_serializes_s3_attachment() {
    let req = ChatRequest {
        message: "what is this".to_owned(),
        session_id: Some("s1".to_owned()),
        image: Some(ImageAttachment::S3 { s3_url: "s3://bucket/key.png".to_owned() }),
    };
    let value = serde_json::to_value(&req).expect("serialize");
    assert_eq!(value["image"], serde_json::json!({ "s3Url": "s3://bucket/key.png" }));
    assert_eq!(value["sessionId"], "s1");
}

#[test]
fn chat_request_serializes_inline_attachment() {
    let image = ImageAttachment::Inline { base64: "AAEC".to_owned(), media_type: "image/jpeg".to_owned() };
    let value = serde_json::to_value(&image).expect("serialize");
    assert_eq!(value, serde_json::json!({ "base64": "AAEC", "mediaType": "image/jpeg" }));
}

// =============================================================
// ChatResponse
// =============================================================

#[test]
fn chat_response_defaults_missing_lists() {
    let resp: ChatResponse = serde_json::from_value(serde_json::json!({ "sessionId": "s1" })).expect("parse");
    assert_eq!(resp.session_id.as_deref(), Some("s1"));
    assert!(resp.messages.is_empty());
    assert!(resp.artifacts.is_empty());
    assert!(resp.display_images.is_empty());
}

#[test]
fn chat_response_keeps_artifact_extras() {
    let resp: ChatResponse = serde_json::from_value(serde_json::json!({
        "messages": [{ "role": "assistant", "content": "done" }],
        "artifacts": [{ "id": "a1", "url": "https://cdn/a1.png", "label": "depth map", "kind": "depth" }],
        "displayImages": [{ "url": "https://cdn/d.png", "message": "look", "score": 0.9 }],
        "ignored": true
    }))
    .expect("parse");

    assert_eq!(resp.messages[0].content.as_deref(), Some("done"));
    let artifact = &resp.artifacts[0];
    assert_eq!(artifact.label.as_deref(), Some("depth map"));
    assert_eq!(artifact.extra.get("kind"), Some(&serde_json::json!("depth")));

    let display = &resp.display_images[0];
    assert_eq!(display.message.as_deref(), Some("look"));
    assert_eq!(display.extra.get("score"), Some(&serde_json::json!(0.9)));
}

#[test]
fn artifact_serializes_back_to_flat_object() {
    let artifact: Artifact =
        serde_json::from_value(serde_json::json!({ "id": "a1", "url": "u", "kind": "mesh" })).expect("parse");
    let value = serde_json::to_value(&artifact).expect("serialize");
    assert_eq!(value["kind"], "mesh");
    assert_eq!(value["id"], "a1");
}

#[test]
fn chat_response_reads_null_lists_as_empty() {
    let resp: ChatResponse = serde_json::from_value(serde_json::json!({
        "sessionId": "s1",
        "messages": null,
        "artifacts": "none",
        "displayImages": {}
    }))
    .expect("parse");
    assert_eq!(resp.session_id.as_deref(), Some("s1"));
    assert!(resp.messages.is_empty());
    assert!(resp.artifacts.is_empty());
    assert!(resp.display_images.is_empty());
}

#[test]
fn numeric_ids_are_stringified() {
    let resp: ChatResponse = serde_json::from_value(serde_json::json!({
        "messages": [{ "content": "ok" }],
        "artifacts": [{ "id": 7, "url": "https://cdn/a.png" }],
        "displayImages": [{ "id": 2.5, "url": "https://cdn/d.png" }, { "id": true, "url": "https://cdn/e.png" }]
    }))
    .expect("parse");
    assert_eq!(resp.artifacts[0].id.as_deref(), Some("7"));
    assert_eq!(resp.display_images[0].id.as_deref(), Some("2.5"));
    assert_eq!(resp.display_images[1].id, None);
}

// =============================================================
// misc payloads
// =============================================================

#[test]
fn error_payload_tolerates_missing_error() {
    let payload: ErrorPayload = serde_json::from_value(serde_json::json!({})).expect("parse");
    assert_eq!(payload.error, None);
}

#[test]
fn upload_response_parses_url() {
    let resp: UploadResponse = serde_json::from_value(serde_json::json!({ "url": "https://files/url.png" })).expect("parse");
    assert_eq!(resp.url, "https://files/url.png");
}

#[test]
fn user_profile_display_name_fallbacks() {
    let named = UserProfile { name: Some("Ann".to_owned()), email: Some("a@x".to_owned()), ..UserProfile::default() };
    assert_eq!(named.display_name(), "Ann");
    let mailed = UserProfile { email: Some("a@x".to_owned()), ..UserProfile::default() };
    assert_eq!(mailed.display_name(), "a@x");
    assert_eq!(UserProfile::default().display_name(), "signed in");
}
