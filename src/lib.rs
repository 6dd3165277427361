//! # rose-studio
//!
//! Leptos + WASM single-page workspace: an assistant chat, a 3D preview, and
//! an image gallery that the chat and upload flows keep in sync.
//!
//! The gallery core (`gallery`) is plain Rust with no browser dependency: a
//! `GalleryBridge` facade lets unrelated producers add or remove images and
//! read the active image while exactly one `GalleryOwner` holds the ordered,
//! de-duplicated collection. Everything that touches the browser sits behind
//! the `csr` feature.

pub mod app;
pub mod components;
pub mod config;
pub mod gallery;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    let _ = console_log::init_with_level(level);
    leptos::mount::mount_to_body(app::App);
}
