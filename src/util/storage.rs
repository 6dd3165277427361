//! Browser storage helpers for JSON values.
//!
//! SYSTEM CONTEXT
//! ==============
//! Centralizes csr-only `localStorage`/`sessionStorage` glue so the auth flow
//! can persist tokens and PKCE state without repeating web-sys calls. Native
//! builds read nothing and write nothing.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Which browser storage area to use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Area {
    /// Survives reloads and new tabs.
    Local,
    /// Scoped to the tab; used for one-shot redirect state.
    Session,
}

#[cfg(feature = "csr")]
fn storage(area: Area) -> Option<web_sys::Storage> {
    let window = web_sys::window()?;
    match area {
        Area::Local => window.local_storage().ok().flatten(),
        Area::Session => window.session_storage().ok().flatten(),
    }
}

/// Load a JSON value stored under `key`.
pub fn load_json<T: DeserializeOwned>(area: Area, key: &str) -> Option<T> {
    #[cfg(feature = "csr")]
    {
        let raw = storage(area)?.get_item(key).ok().flatten()?;
        serde_json::from_str(&raw).ok()
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (area, key);
        None
    }
}

/// Save a JSON value under `key`.
pub fn save_json<T: Serialize>(area: Area, key: &str, value: &T) {
    #[cfg(feature = "csr")]
    {
        let Some(storage) = storage(area) else {
            return;
        };
        let Ok(raw) = serde_json::to_string(value) else {
            return;
        };
        let _ = storage.set_item(key, &raw);
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (area, key, value);
    }
}

/// Remove `key`.
pub fn remove(area: Area, key: &str) {
    #[cfg(feature = "csr")]
    {
        if let Some(storage) = storage(area) {
            let _ = storage.remove_item(key);
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (area, key);
    }
}
