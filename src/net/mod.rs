//! Networking modules for the chat and upload backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls and `types` defines the wire schema. `chat` and
//! `upload` drive one user action each, from the UI event to the gallery.

pub mod api;
pub mod chat;
pub mod types;
pub mod upload;
