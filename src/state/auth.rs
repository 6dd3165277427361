//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Written by `util::auth` while the identity provider flow runs; read by the
//! auth gate, the toolbar, and the chat/upload flows before they call the API.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::UserProfile;

/// Where the sign-in flow currently stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthStatus {
    /// Initial state while the identity provider is consulted.
    #[default]
    Loading,
    Authenticated,
    Unauthenticated,
    /// Sign-in failed irrecoverably; the page shows an error card.
    Failed,
}

/// Authentication state tracking the current user and token.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub status: AuthStatus,
    pub access_token: Option<String>,
    pub user: Option<UserProfile>,
    pub error: Option<String>,
}

impl AuthState {
    /// State used when no identity provider is configured.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            status: AuthStatus::Authenticated,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn signed_in(access_token: String, user: Option<UserProfile>) -> Self {
        Self {
            status: AuthStatus::Authenticated,
            access_token: Some(access_token),
            user,
            error: None,
        }
    }

    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            status: AuthStatus::Failed,
            error: Some(error.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.status == AuthStatus::Authenticated
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == AuthStatus::Loading
    }
}
