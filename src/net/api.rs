//! REST helpers for the chat and upload backend.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Native builds (tests): stubs returning [`ApiError::Unavailable`] since
//! these endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result` outputs instead of panics so chat/upload failures
//! degrade into bot messages and toasts rather than breaking the page.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use crate::config::AppConfig;

use super::types::{ChatRequest, ChatResponse};
#[cfg(any(test, feature = "csr"))]
use super::types::ErrorPayload;
#[cfg(feature = "csr")]
use super::types::UploadResponse;

pub const CHAT_PATH: &str = "/api/chat";
pub const UPLOAD_PATH: &str = "/api/upload";
pub const DEFAULT_IMAGE_CONTENT_TYPE: &str = "image/png";
pub const UNEXPECTED_SERVER_ERROR: &str = "Unexpected error talking to the server.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("{message} (status {status})")]
    Status { status: u16, message: String },
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("not available outside the browser")]
    Unavailable,
}

impl ApiError {
    /// Text suitable for showing to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(any(test, feature = "csr"))]
fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Message for a non-OK response, preferring the server's `error` field.
#[cfg(any(test, feature = "csr"))]
fn status_error(status: u16, payload: Option<ErrorPayload>) -> ApiError {
    let message = payload
        .and_then(|p| p.error)
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| UNEXPECTED_SERVER_ERROR.to_owned());
    ApiError::Status { status, message }
}

#[cfg(any(test, feature = "csr"))]
fn content_type_or_default(header: Option<String>) -> String {
    header
        .map(|value| value.split(';').next().unwrap_or_default().trim().to_owned())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_IMAGE_CONTENT_TYPE.to_owned())
}

/// Send one chat turn via `POST /api/chat`.
///
/// # Errors
///
/// Returns an error if the request fails, the server answers non-OK, or the
/// body does not parse.
pub async fn post_chat(config: &AppConfig, token: &str, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
    #[cfg(feature = "csr")]
    {
        let resp = gloo_net::http::Request::post(&config.api_url(CHAT_PATH))
            .header("Authorization", &bearer(token))
            .json(request)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !resp.ok() {
            let payload = resp.json::<ErrorPayload>().await.ok();
            return Err(status_error(resp.status(), payload));
        }
        resp.json::<ChatResponse>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (config, token, request);
        Err(ApiError::Unavailable)
    }
}

/// Upload one image file via multipart `POST /api/upload`.
///
/// # Errors
///
/// Returns an error if the form cannot be built, the request fails, or the
/// server answers non-OK.
#[cfg(feature = "csr")]
pub async fn upload_image(config: &AppConfig, token: &str, file: &web_sys::File) -> Result<UploadResponse, ApiError> {
    let form = web_sys::FormData::new().map_err(|e| ApiError::Network(format!("{e:?}")))?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|e| ApiError::Network(format!("{e:?}")))?;

    let resp = gloo_net::http::Request::post(&config.api_url(UPLOAD_PATH))
        .header("Authorization", &bearer(token))
        .body(form)
        .map_err(|e| ApiError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    if !resp.ok() {
        let payload = resp.json::<ErrorPayload>().await.ok();
        return Err(status_error(resp.status(), payload));
    }
    resp.json::<UploadResponse>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Fetch image bytes (CORS) and their media type.
///
/// # Errors
///
/// Returns an error if the request fails, the server answers non-OK, or the
/// body is empty.
pub async fn fetch_image_bytes(url: &str) -> Result<(Vec<u8>, String), ApiError> {
    #[cfg(feature = "csr")]
    {
        let resp = gloo_net::http::Request::get(url)
            .mode(web_sys::RequestMode::Cors)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !resp.ok() {
            return Err(status_error(resp.status(), None));
        }
        let content_type = content_type_or_default(resp.headers().get("content-type"));
        let bytes = resp.binary().await.map_err(|e| ApiError::Decode(e.to_string()))?;
        if bytes.is_empty() {
            return Err(ApiError::Decode("empty image body".to_owned()));
        }
        Ok((bytes, content_type))
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = url;
        Err(ApiError::Unavailable)
    }
}
