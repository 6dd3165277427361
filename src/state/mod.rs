//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`auth`, `chat`, `ui`) so individual components
//! can depend on small focused models. Gallery state lives in `crate::gallery`
//! because it is shared outside the reactive tree as well.

pub mod auth;
pub mod chat;
pub mod ui;
