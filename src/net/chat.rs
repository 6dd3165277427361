//! Chat agent glue between the chat panel, the backend, and the gallery.
//!
//! SYSTEM CONTEXT
//! ==============
//! The chat panel hands every submitted line to [`submit`]. One turn at a
//! time is in flight: the input is locked, the currently displayed gallery
//! image is attached as context, and the assistant's artifacts and display
//! images are published to the gallery through the [`GalleryBridge`] before
//! the reply text is appended to the transcript.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here surfaces as an error to the caller. Server rejections become
//! the server's own message, transport failures become
//! [`FAILED_TO_REACH`], and the in-flight flags are cleared on every path.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use super::types::{ChatResponse, ImageAttachment};
use crate::gallery::{AddImageOptions, GalleryBridge};
use crate::state::chat::{ChatState, Sender};

pub const STILL_WORKING: &str = "Still working on the last request, please wait a moment.";
pub const REDIRECTING_TO_LOGIN: &str = "Redirecting to authenticate. Try again after signing in.";
pub const MISSING_TOKEN: &str = "Unable to retrieve your access token. Please sign in again.";
pub const EMPTY_REPLY: &str = "The assistant did not return any content.";
pub const FAILED_TO_REACH: &str = "Failed to reach the chat service. Please try again.";

const S3_SCHEME: &str = "s3://";

/// What to do with one submitted input line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitDecision {
    /// Blank input; clear the box and do nothing else.
    Ignore,
    /// A turn is already in flight; echo the message and ask the user to wait.
    Busy(String),
    /// Start a new turn with the trimmed message.
    Send(String),
}

#[must_use]
pub fn classify_submit(input: &str, sending: bool) -> SubmitDecision {
    let message = input.trim();
    if message.is_empty() {
        SubmitDecision::Ignore
    } else if sending {
        SubmitDecision::Busy(message.to_owned())
    } else {
        SubmitDecision::Send(message.to_owned())
    }
}

/// How the active gallery image travels with a chat request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttachmentSource {
    /// Already in object storage; the backend reads it directly.
    S3(String),
    /// Fetched by the browser and sent inline.
    Fetch(String),
}

/// Classify the active image url. Blank urls attach nothing.
#[must_use]
pub fn attachment_source(active_url: &str) -> Option<AttachmentSource> {
    let url = active_url.trim();
    if url.is_empty() {
        return None;
    }
    let is_s3 = url
        .get(..S3_SCHEME.len())
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case(S3_SCHEME));
    Some(if is_s3 {
        AttachmentSource::S3(url.to_owned())
    } else {
        AttachmentSource::Fetch(url.to_owned())
    })
}

#[must_use]
pub fn inline_attachment(bytes: &[u8], media_type: &str) -> ImageAttachment {
    ImageAttachment::Inline {
        base64: STANDARD.encode(bytes),
        media_type: media_type.to_owned(),
    }
}

/// Publish the response's artifacts and display images to the gallery.
///
/// Entries without a url are skipped. The first display image becomes the
/// active image when it carries a url.
pub fn publish_response_images(bridge: &GalleryBridge, response: &ChatResponse) {
    for artifact in &response.artifacts {
        let Some(url) = artifact.url.as_deref().filter(|url| !url.is_empty()) else {
            continue;
        };
        let options = AddImageOptions {
            description: artifact.label.clone(),
            source_id: Some(artifact.id.clone().unwrap_or_else(|| url.to_owned())),
            metadata: serde_json::to_value(artifact).ok(),
            ..AddImageOptions::default()
        };
        bridge.add_image_by_url(url, options);
    }

    for (index, image) in response.display_images.iter().enumerate() {
        let Some(url) = image.url.as_deref().filter(|url| !url.is_empty()) else {
            continue;
        };
        let options = AddImageOptions {
            description: image.description.clone().or_else(|| image.message.clone()),
            source_id: Some(image.id.clone().unwrap_or_else(|| url.to_owned())),
            metadata: serde_json::to_value(image).ok(),
            ..AddImageOptions::default()
        };
        bridge.add_image_by_url(url, options);
        if index == 0 {
            bridge.set_active_image_url(url);
        }
    }
}

/// Reply lines worth showing, in order, with their sender.
#[must_use]
pub fn reply_messages(response: &ChatResponse) -> Vec<(Sender, String)> {
    response
        .messages
        .iter()
        .filter_map(|reply| {
            let content = reply.content.as_deref().filter(|c| !c.is_empty())?;
            Some((Sender::from_role(reply.role.as_deref()), content.to_owned()))
        })
        .collect()
}

/// Fold a successful response into the transcript and the gallery.
///
/// A response without replies only records the session id and the
/// [`EMPTY_REPLY`] notice; its images are not published.
pub fn apply_chat_response(chat: &mut ChatState, bridge: &GalleryBridge, response: &ChatResponse) {
    if let Some(session_id) = response.session_id.as_ref().filter(|id| !id.is_empty()) {
        chat.session_id = Some(session_id.clone());
    }

    if response.messages.is_empty() {
        chat.push(Sender::Bot, EMPTY_REPLY);
        return;
    }

    publish_response_images(bridge, response);
    for (sender, content) in reply_messages(response) {
        chat.push(sender, content);
    }
}

#[cfg(feature = "csr")]
pub use browser::submit;

#[cfg(feature = "csr")]
mod browser {
    use leptos::prelude::*;

    use super::{
        AttachmentSource, FAILED_TO_REACH, MISSING_TOKEN, REDIRECTING_TO_LOGIN, STILL_WORKING, SubmitDecision,
        apply_chat_response, attachment_source, classify_submit, inline_attachment,
    };
    use crate::config::AppConfig;
    use crate::gallery::GalleryBridge;
    use crate::net::api::{self, ApiError};
    use crate::net::types::{ChatRequest, ImageAttachment};
    use crate::state::auth::AuthState;
    use crate::state::chat::{ChatState, Sender};
    use crate::util::auth;

    /// Handle one submitted input line from the chat panel.
    pub fn submit(
        input: &str,
        chat: RwSignal<ChatState>,
        auth_state: RwSignal<AuthState>,
        bridge: GalleryBridge,
        config: AppConfig,
    ) {
        let message = match classify_submit(input, chat.get_untracked().sending) {
            SubmitDecision::Ignore => return,
            SubmitDecision::Busy(message) => {
                chat.update(|c| {
                    c.push(Sender::User, message);
                    c.push(Sender::Bot, STILL_WORKING);
                });
                return;
            }
            SubmitDecision::Send(message) => message,
        };

        chat.update(|c| {
            c.sending = true;
            c.push(Sender::User, message.clone());
        });

        leptos::task::spawn_local(async move {
            run_turn(message, chat, auth_state, &bridge, &config).await;
            chat.update(ChatState::finish_turn);
        });
    }

    async fn run_turn(
        message: String,
        chat: RwSignal<ChatState>,
        auth_state: RwSignal<AuthState>,
        bridge: &GalleryBridge,
        config: &AppConfig,
    ) {
        if !auth_state.get_untracked().is_authenticated() {
            auth::login(config, None);
            chat.update(|c| c.push(Sender::Bot, REDIRECTING_TO_LOGIN));
            return;
        }

        let token = match auth::access_token(config).await {
            Ok(Some(token)) => token,
            Ok(None) => {
                chat.update(|c| c.push(Sender::Bot, MISSING_TOKEN));
                return;
            }
            Err(e) => {
                leptos::logging::error!("access token retrieval failed: {e}");
                auth_state.update(|a| a.error = Some(e.to_string()));
                chat.update(|c| c.push(Sender::Bot, MISSING_TOKEN));
                return;
            }
        };
        auth_state.update(|a| a.access_token = Some(token.clone()));

        chat.update(|c| c.typing = true);

        let image = prepare_attachment(&bridge.active_image_url()).await;
        let request = ChatRequest {
            message,
            session_id: chat.get_untracked().session_id,
            image,
        };

        match api::post_chat(config, &token, &request).await {
            Ok(response) => {
                let mut next = chat.get_untracked();
                apply_chat_response(&mut next, bridge, &response);
                chat.set(next);
            }
            Err(ApiError::Status { message, .. }) => {
                chat.update(|c| c.push(Sender::Bot, message));
            }
            Err(e) => {
                leptos::logging::error!("chat request failed: {e}");
                chat.update(|c| c.push(Sender::Bot, FAILED_TO_REACH));
            }
        }
    }

    async fn prepare_attachment(active_url: &str) -> Option<ImageAttachment> {
        match attachment_source(active_url)? {
            AttachmentSource::S3(s3_url) => Some(ImageAttachment::S3 { s3_url }),
            AttachmentSource::Fetch(url) => match api::fetch_image_bytes(&url).await {
                Ok((bytes, media_type)) => Some(inline_attachment(&bytes, &media_type)),
                Err(e) => {
                    leptos::logging::error!("unable to prepare chat image attachment: {e}");
                    None
                }
            },
        }
    }
}
