use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key: &str| map.get(key).cloned()
}

// =============================================================
// auth
// =============================================================

#[test]
fn auth_disabled_without_domain_and_client_id() {
    let config = AppConfig::from_lookup(lookup(&[]), "http://localhost:8080").expect("config");
    assert!(config.auth.is_none());
    assert_eq!(config.api_base, "");
}

#[test]
fn partial_auth_config_is_an_error() {
    let err = AppConfig::from_lookup(lookup(&[("ROSE_AUTH_DOMAIN", "tenant.example.com")]), "http://x")
        .expect_err("partial config");
    assert_eq!(err, ConfigError::MissingValue { key: "ROSE_AUTH_CLIENT_ID" });

    let err = AppConfig::from_lookup(lookup(&[("ROSE_AUTH_CLIENT_ID", "abc")]), "http://x").expect_err("partial");
    assert_eq!(err, ConfigError::MissingValue { key: "ROSE_AUTH_DOMAIN" });
}

#[test]
fn auth_defaults_redirect_and_scope() {
    let config = AppConfig::from_lookup(
        lookup(&[("ROSE_AUTH_DOMAIN", "tenant.example.com"), ("ROSE_AUTH_CLIENT_ID", "abc")]),
        "http://localhost:8080/",
    )
    .expect("config");
    let auth = config.auth.expect("auth");
    assert_eq!(auth.redirect_uri, "http://localhost:8080/auth/callback");
    assert_eq!(auth.scope, "openid profile email offline_access");
    assert_eq!(auth.audience, None);
    assert_eq!(auth.issuer(), "https://tenant.example.com");
}

#[test]
fn auth_respects_explicit_values() {
    let config = AppConfig::from_lookup(
        lookup(&[
            ("ROSE_AUTH_DOMAIN", "https://tenant.example.com/"),
            ("ROSE_AUTH_CLIENT_ID", "abc"),
            ("ROSE_AUTH_AUDIENCE", "https://api.example.com"),
            ("ROSE_AUTH_REDIRECT_URI", "https://app.example.com/cb"),
            ("ROSE_AUTH_SCOPE", "openid offline_access email"),
        ]),
        "http://ignored",
    )
    .expect("config");
    let auth = config.auth.expect("auth");
    assert_eq!(auth.audience.as_deref(), Some("https://api.example.com"));
    assert_eq!(auth.redirect_uri, "https://app.example.com/cb");
    assert_eq!(auth.scope, "openid offline_access email");
    assert_eq!(auth.issuer(), "https://tenant.example.com");
}

#[test]
fn blank_values_count_as_missing() {
    let config = AppConfig::from_lookup(
        lookup(&[("ROSE_AUTH_DOMAIN", "  "), ("ROSE_AUTH_CLIENT_ID", "")]),
        "http://x",
    )
    .expect("config");
    assert!(config.auth.is_none());
}

// =============================================================
// scope / api
// =============================================================

#[test]
fn normalize_scope_dedups_and_appends_offline_access_once() {
    assert_eq!(normalize_scope("openid  openid profile"), "openid profile offline_access");
    assert_eq!(normalize_scope(""), "offline_access");
    assert_eq!(normalize_scope("offline_access openid"), "offline_access openid");
}

#[test]
fn api_url_joins_trimmed_base() {
    let config = AppConfig::from_lookup(lookup(&[("ROSE_API_BASE", "https://api.example.com/")]), "http://x")
        .expect("config");
    assert_eq!(config.api_url("/api/chat"), "https://api.example.com/api/chat");
    assert_eq!(AppConfig::default().api_url("/api/upload"), "/api/upload");
}
