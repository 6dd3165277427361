//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the workspace chrome and interaction surfaces while
//! reading/writing shared state from Leptos context providers.

pub mod chat_panel;
pub mod gallery_panel;
pub mod scene_preview;
pub mod toast;
pub mod toolbar;
