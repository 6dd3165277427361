//! Build-time application configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! A static SPA has no runtime environment, so values are captured with
//! `option_env!` when the WASM bundle is built:
//!
//! - `ROSE_AUTH_DOMAIN`, `ROSE_AUTH_CLIENT_ID`: identity provider tenant;
//!   authentication is disabled unless both are set
//! - `ROSE_AUTH_AUDIENCE`: API audience, attached only when present
//! - `ROSE_AUTH_REDIRECT_URI`: default `{origin}/auth/callback`
//! - `ROSE_AUTH_SCOPE`: default `openid profile email`; `offline_access` is
//!   always requested so refresh tokens are issued
//! - `ROSE_API_BASE`: backend base url, default same-origin

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_SCOPE: &str = "openid profile email";
pub const OFFLINE_ACCESS_SCOPE: &str = "offline_access";
pub const CALLBACK_PATH: &str = "/auth/callback";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing configuration value: {key}")]
    MissingValue { key: &'static str },
}

/// Identity provider settings for the authorization-code flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    pub domain: String,
    pub client_id: String,
    pub audience: Option<String>,
    pub redirect_uri: String,
    pub scope: String,
}

impl AuthConfig {
    /// Base url of the identity provider tenant.
    #[must_use]
    pub fn issuer(&self) -> String {
        let domain = self.domain.trim_end_matches('/');
        if domain.starts_with("https://") || domain.starts_with("http://") {
            domain.to_owned()
        } else {
            format!("https://{domain}")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppConfig {
    /// `None` disables authentication entirely.
    pub auth: Option<AuthConfig>,
    /// Prefix for backend API paths; empty means same origin.
    pub api_base: String,
}

impl AppConfig {
    /// Build config from a key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingValue`] when only one of the domain and
    /// client id is configured.
    pub fn from_lookup<F>(lookup: F, origin: &str) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let api_base = get("ROSE_API_BASE")
            .map(|base| base.trim_end_matches('/').to_owned())
            .unwrap_or_default();

        let auth = match (get("ROSE_AUTH_DOMAIN"), get("ROSE_AUTH_CLIENT_ID")) {
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::MissingValue { key: "ROSE_AUTH_CLIENT_ID" }),
            (None, Some(_)) => return Err(ConfigError::MissingValue { key: "ROSE_AUTH_DOMAIN" }),
            (Some(domain), Some(client_id)) => Some(AuthConfig {
                domain,
                client_id,
                audience: get("ROSE_AUTH_AUDIENCE"),
                redirect_uri: get("ROSE_AUTH_REDIRECT_URI")
                    .unwrap_or_else(|| format!("{}{CALLBACK_PATH}", origin.trim_end_matches('/'))),
                scope: normalize_scope(get("ROSE_AUTH_SCOPE").as_deref().unwrap_or(DEFAULT_SCOPE)),
            }),
        };

        Ok(Self { auth, api_base })
    }

    /// Config baked in at build time.
    ///
    /// A half-configured identity provider is logged and treated as disabled.
    #[must_use]
    pub fn from_build_env(origin: &str) -> Self {
        let lookup = |key: &str| {
            let value = match key {
                "ROSE_AUTH_DOMAIN" => option_env!("ROSE_AUTH_DOMAIN"),
                "ROSE_AUTH_CLIENT_ID" => option_env!("ROSE_AUTH_CLIENT_ID"),
                "ROSE_AUTH_AUDIENCE" => option_env!("ROSE_AUTH_AUDIENCE"),
                "ROSE_AUTH_REDIRECT_URI" => option_env!("ROSE_AUTH_REDIRECT_URI"),
                "ROSE_AUTH_SCOPE" => option_env!("ROSE_AUTH_SCOPE"),
                "ROSE_API_BASE" => option_env!("ROSE_API_BASE"),
                _ => None,
            };
            value.map(str::to_owned)
        };
        Self::from_lookup(lookup, origin).unwrap_or_else(|e| {
            leptos::logging::warn!("auth config ignored: {e}");
            Self::from_lookup(|key| if key == "ROSE_API_BASE" { lookup(key) } else { None }, origin)
                .unwrap_or_default()
        })
    }

    /// Absolute or same-origin url for an API path such as `/api/chat`.
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }
}

/// Split, de-duplicate, and append `offline_access` if missing.
#[must_use]
pub fn normalize_scope(raw: &str) -> String {
    let mut scopes: Vec<&str> = Vec::new();
    for scope in raw.split_whitespace().chain(std::iter::once(OFFLINE_ACCESS_SCOPE)) {
        if !scopes.contains(&scope) {
            scopes.push(scope);
        }
    }
    scopes.join(" ")
}
