//! Identity provider sign-in: authorization code flow with PKCE.
//!
//! SYSTEM CONTEXT
//! ==============
//! The app signs users in against an OAuth 2 tenant at `https://{domain}`.
//! `initialize` runs once at startup: it finishes a pending redirect
//! callback, loads or refreshes stored tokens, and otherwise sends the
//! browser to the authorize endpoint. Tokens live in `localStorage`; the
//! one-shot PKCE verifier and `state` live in `sessionStorage`.
//!
//! ERROR HANDLING
//! ==============
//! A refresh that fails because the tenant no longer holds a refresh token
//! restarts the login with `prompt=consent` instead of failing the page.
//! Every other failure surfaces as [`AuthError`] and ends in the error card.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::AuthConfig;

pub const TOKENS_KEY: &str = "rose_studio_tokens";
pub const PENDING_LOGIN_KEY: &str = "rose_studio_pending_login";
pub const CONSENT_PROMPT: &str = "consent";
pub const MISSING_REFRESH_TOKEN: &str = "missing_refresh_token";

/// Refresh this long before the access token actually expires.
const EXPIRY_LEEWAY_MS: f64 = 60_000.0;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("identity provider request failed: {0}")]
    Request(String),
    #[error("{error}: {description}")]
    Token { error: String, description: String },
    #[error("no pending login for this callback")]
    MissingVerifier,
    #[error("login state does not match")]
    StateMismatch,
}

impl AuthError {
    #[cfg(any(test, feature = "csr"))]
    fn missing_refresh_token() -> Self {
        Self::Token {
            error: MISSING_REFRESH_TOKEN.to_owned(),
            description: "Missing Refresh Token".to_owned(),
        }
    }
}

/// Whether `error` means the tenant holds no refresh token for this session.
#[must_use]
pub fn is_missing_refresh_token_error(error: &AuthError) -> bool {
    match error {
        AuthError::Token { error, .. } if error == MISSING_REFRESH_TOKEN => true,
        other => other.to_string().to_lowercase().contains("missing refresh token"),
    }
}

/// Random PKCE code verifier (64 unreserved characters).
#[must_use]
pub fn pkce_verifier() -> String {
    format!("{}{}", uuid::Uuid::new_v4().simple(), uuid::Uuid::new_v4().simple())
}

/// S256 code challenge for `verifier`.
#[must_use]
pub fn pkce_challenge(verifier: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()))
}

/// Verifier and `state` remembered across the authorize redirect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingLogin {
    pub verifier: String,
    pub state: String,
}

impl PendingLogin {
    #[must_use]
    pub fn generate() -> Self {
        Self {
            verifier: pkce_verifier(),
            state: uuid::Uuid::new_v4().simple().to_string(),
        }
    }
}

/// Authorize endpoint url for a fresh login.
///
/// # Errors
///
/// Returns [`AuthError::Request`] when the configured domain is not a valid
/// url host.
pub fn authorize_url(
    auth: &AuthConfig,
    pending: &PendingLogin,
    prompt: Option<&str>,
) -> Result<String, AuthError> {
    let mut url = url::Url::parse(&format!("{}/authorize", auth.issuer()))
        .map_err(|e| AuthError::Request(e.to_string()))?;
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("response_type", "code")
            .append_pair("client_id", &auth.client_id)
            .append_pair("redirect_uri", &auth.redirect_uri)
            .append_pair("scope", &auth.scope)
            .append_pair("state", &pending.state)
            .append_pair("code_challenge", &pkce_challenge(&pending.verifier))
            .append_pair("code_challenge_method", "S256");
        if let Some(audience) = &auth.audience {
            query.append_pair("audience", audience);
        }
        if let Some(prompt) = prompt {
            query.append_pair("prompt", prompt);
        }
    }
    Ok(url.into())
}

/// Logout endpoint url returning to `return_to`.
///
/// # Errors
///
/// Returns [`AuthError::Request`] when the configured domain is not a valid
/// url host.
pub fn logout_url(auth: &AuthConfig, return_to: &str) -> Result<String, AuthError> {
    let mut url = url::Url::parse(&format!("{}/v2/logout", auth.issuer()))
        .map_err(|e| AuthError::Request(e.to_string()))?;
    url.query_pairs_mut()
        .append_pair("client_id", &auth.client_id)
        .append_pair("returnTo", return_to);
    Ok(url.into())
}

/// `code` and `state` from a redirect callback query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallbackParams {
    pub code: String,
    pub state: String,
}

/// Parse a `location.search` string; `None` unless both `code` and `state`
/// are present.
#[must_use]
pub fn callback_params(search: &str) -> Option<CallbackParams> {
    let query = search.strip_prefix('?').unwrap_or(search);
    let mut code = None;
    let mut state = None;
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "code" => code = Some(value.into_owned()),
            "state" => state = Some(value.into_owned()),
            _ => {}
        }
    }
    Some(CallbackParams {
        code: code.filter(|c| !c.is_empty())?,
        state: state.filter(|s| !s.is_empty())?,
    })
}

/// Check the callback against the login that started it.
///
/// # Errors
///
/// Returns [`AuthError::MissingVerifier`] without a pending login and
/// [`AuthError::StateMismatch`] when the states differ.
pub fn verify_callback<'a>(
    params: &CallbackParams,
    pending: Option<&'a PendingLogin>,
) -> Result<&'a PendingLogin, AuthError> {
    let pending = pending.ok_or(AuthError::MissingVerifier)?;
    if pending.state == params.state {
        Ok(pending)
    } else {
        Err(AuthError::StateMismatch)
    }
}

/// Form body for the authorization-code exchange.
#[must_use]
pub fn code_exchange_body(auth: &AuthConfig, code: &str, verifier: &str) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("grant_type", "authorization_code")
        .append_pair("client_id", &auth.client_id)
        .append_pair("code", code)
        .append_pair("code_verifier", verifier)
        .append_pair("redirect_uri", &auth.redirect_uri)
        .finish()
}

/// Form body for a refresh-token grant.
#[must_use]
pub fn refresh_body(auth: &AuthConfig, refresh_token: &str) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("grant_type", "refresh_token")
        .append_pair("client_id", &auth.client_id)
        .append_pair("refresh_token", refresh_token)
        .finish()
}

/// Successful token endpoint response.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Error body of the token endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct TokenErrorResponse {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub error_description: String,
}

impl From<TokenErrorResponse> for AuthError {
    fn from(body: TokenErrorResponse) -> Self {
        Self::Token {
            error: body.error,
            description: body.error_description,
        }
    }
}

/// Tokens persisted between page loads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredTokens {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Epoch milliseconds; `None` when the tenant did not say.
    #[serde(default)]
    pub expires_at_ms: Option<f64>,
}

impl StoredTokens {
    /// Build from a token response, keeping `previous_refresh` when the tenant
    /// does not rotate refresh tokens.
    #[must_use]
    pub fn from_response(response: TokenResponse, now_ms: f64, previous_refresh: Option<String>) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let expires_at_ms = response.expires_in.map(|secs| now_ms + secs as f64 * 1_000.0);
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token.or(previous_refresh),
            expires_at_ms,
        }
    }

    #[must_use]
    pub fn is_fresh(&self, now_ms: f64) -> bool {
        self.expires_at_ms.is_none_or(|at| now_ms + EXPIRY_LEEWAY_MS < at)
    }
}

#[cfg(feature = "csr")]
pub use browser::{access_token, initialize, login, logout};

#[cfg(feature = "csr")]
mod browser {
    use super::{
        AuthError, CONSENT_PROMPT, PENDING_LOGIN_KEY, PendingLogin, StoredTokens, TOKENS_KEY, TokenErrorResponse,
        TokenResponse, authorize_url, callback_params, code_exchange_body, is_missing_refresh_token_error,
        logout_url, refresh_body, verify_callback,
    };
    use crate::config::{AppConfig, AuthConfig};
    use crate::net::types::UserProfile;
    use crate::state::auth::{AuthState, AuthStatus};
    use crate::util::storage::{self, Area};

    fn now_ms() -> f64 {
        js_sys::Date::now()
    }

    fn navigate(href: &str) -> bool {
        web_sys::window().is_some_and(|window| window.location().set_href(href).is_ok())
    }

    /// Resolve the sign-in state at startup.
    ///
    /// Returns a `Loading` state while the browser is being redirected.
    pub async fn initialize(config: &AppConfig) -> AuthState {
        let Some(auth) = config.auth.as_ref() else {
            return AuthState::disabled();
        };

        if let Err(e) = finish_callback(auth).await {
            leptos::logging::error!("sign-in callback failed: {e}");
            return AuthState::failed(e.to_string());
        }

        match access_token(config).await {
            Ok(Some(token)) => {
                let user = match fetch_user(auth, &token).await {
                    Ok(user) => Some(user),
                    Err(e) => {
                        leptos::logging::warn!("user profile unavailable: {e}");
                        None
                    }
                };
                AuthState::signed_in(token, user)
            }
            Ok(None) if login(config, None) => AuthState::default(),
            Ok(None) => AuthState {
                status: AuthStatus::Unauthenticated,
                ..AuthState::default()
            },
            Err(e) if is_missing_refresh_token_error(&e) => AuthState::default(),
            Err(e) => {
                leptos::logging::error!("authentication error: {e}");
                AuthState::failed(e.to_string())
            }
        }
    }

    /// Exchange a callback `code` for tokens and strip the query from history.
    async fn finish_callback(auth: &AuthConfig) -> Result<(), AuthError> {
        let Some(window) = web_sys::window() else {
            return Ok(());
        };
        let location = window.location();
        let search = location.search().unwrap_or_default();
        let Some(params) = callback_params(&search) else {
            return Ok(());
        };

        let pending = storage::load_json::<PendingLogin>(Area::Session, PENDING_LOGIN_KEY);
        storage::remove(Area::Session, PENDING_LOGIN_KEY);
        let pending = verify_callback(&params, pending.as_ref())?;

        let response = post_token(auth, code_exchange_body(auth, &params.code, &pending.verifier)).await?;
        let tokens = StoredTokens::from_response(response, now_ms(), None);
        storage::save_json(Area::Local, TOKENS_KEY, &tokens);

        if let Ok(history) = window.history() {
            let path = location.pathname().unwrap_or_else(|_| "/".to_owned());
            let title = window.document().map(|d| d.title()).unwrap_or_default();
            let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, &title, Some(&path));
        }
        Ok(())
    }

    /// Redirect the browser to the authorize endpoint.
    ///
    /// Returns whether a redirect was started; always `false` when
    /// authentication is disabled.
    pub fn login(config: &AppConfig, prompt: Option<&str>) -> bool {
        let Some(auth) = config.auth.as_ref() else {
            return false;
        };
        let pending = PendingLogin::generate();
        match authorize_url(auth, &pending, prompt) {
            Ok(href) => {
                storage::save_json(Area::Session, PENDING_LOGIN_KEY, &pending);
                navigate(&href)
            }
            Err(e) => {
                leptos::logging::error!("login redirect failed: {e}");
                false
            }
        }
    }

    /// Forget stored tokens and end the tenant session, returning to the origin.
    pub fn logout(config: &AppConfig) {
        storage::remove(Area::Local, TOKENS_KEY);
        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default();
        let href = config
            .auth
            .as_ref()
            .and_then(|auth| logout_url(auth, &origin).ok())
            .unwrap_or(origin);
        if !navigate(&href) {
            leptos::logging::warn!("logout redirect failed");
        }
    }

    /// Current access token, refreshed when close to expiry.
    ///
    /// `Ok(None)` means nobody is signed in (or authentication is disabled).
    ///
    /// # Errors
    ///
    /// Returns the token endpoint error when a refresh fails. A missing
    /// refresh token also restarts the login with `prompt=consent`.
    pub async fn access_token(config: &AppConfig) -> Result<Option<String>, AuthError> {
        let Some(auth) = config.auth.as_ref() else {
            return Ok(None);
        };
        let Some(tokens) = storage::load_json::<StoredTokens>(Area::Local, TOKENS_KEY) else {
            return Ok(None);
        };
        if tokens.is_fresh(now_ms()) {
            return Ok(Some(tokens.access_token));
        }

        let refreshed = match tokens.refresh_token.as_deref() {
            Some(refresh) => post_token(auth, refresh_body(auth, refresh)).await,
            None => Err(AuthError::missing_refresh_token()),
        };
        match refreshed {
            Ok(response) => {
                let next = StoredTokens::from_response(response, now_ms(), tokens.refresh_token);
                storage::save_json(Area::Local, TOKENS_KEY, &next);
                Ok(Some(next.access_token))
            }
            Err(e) => {
                if is_missing_refresh_token_error(&e) {
                    leptos::logging::warn!("refresh token missing, signing in again");
                    storage::remove(Area::Local, TOKENS_KEY);
                    if !login(config, Some(CONSENT_PROMPT)) {
                        leptos::logging::error!("re-login after missing refresh token failed");
                    }
                }
                Err(e)
            }
        }
    }

    async fn post_token(auth: &AuthConfig, body: String) -> Result<TokenResponse, AuthError> {
        let resp = gloo_net::http::Request::post(&format!("{}/oauth/token", auth.issuer()))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .map_err(|e| AuthError::Request(e.to_string()))?
            .send()
            .await
            .map_err(|e| AuthError::Request(e.to_string()))?;
        if !resp.ok() {
            let body = resp.json::<TokenErrorResponse>().await.unwrap_or_default();
            return Err(body.into());
        }
        resp.json::<TokenResponse>()
            .await
            .map_err(|e| AuthError::Request(e.to_string()))
    }

    async fn fetch_user(auth: &AuthConfig, token: &str) -> Result<UserProfile, AuthError> {
        let resp = gloo_net::http::Request::get(&format!("{}/userinfo", auth.issuer()))
            .header("Authorization", &format!("Bearer {token}"))
            .send()
            .await
            .map_err(|e| AuthError::Request(e.to_string()))?;
        if !resp.ok() {
            return Err(AuthError::Request(format!("userinfo status {}", resp.status())));
        }
        resp.json::<UserProfile>()
            .await
            .map_err(|e| AuthError::Request(e.to_string()))
    }
}
