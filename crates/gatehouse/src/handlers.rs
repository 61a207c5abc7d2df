//! Demo pages: an index with login links, the three landing pages the
//! dispatcher redirects to, and a liveness probe.

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
};

use gatehouse_auth::AuthState;
use gatehouse_core::auth::ProviderConnector as _;

/// GET /livez - Basic liveness probe.
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET / - Login links for every registered provider.
pub async fn index(State(state): State<AuthState>) -> Html<String> {
    let mut links = String::new();
    for provider in state.providers() {
        links.push_str(&format!(
            r#"<li><a href="{prefix}/{name}/login">Log in with {name}</a></li>"#,
            prefix = state.config.prefix,
            name = provider.name(),
        ));
    }

    Html(format!(
        "<!doctype html><html><body><h1>Gatehouse</h1><ul>{links}</ul></body></html>"
    ))
}

/// GET /login.html - Landing page after a successful login.
pub async fn login_landing(Query(params): Query<HashMap<String, String>>) -> Html<String> {
    let service = params.get("service").map(String::as_str).unwrap_or("?");
    Html(format!(
        "<!doctype html><html><body><p>Logged in with {}.</p></body></html>",
        escape(service)
    ))
}

/// GET /logout.html - Landing page after logout.
pub async fn logout_landing() -> Html<&'static str> {
    Html("<!doctype html><html><body><p>Logged out.</p></body></html>")
}

/// GET /error.html - Landing page for refused or failed logins.
pub async fn error_landing(Query(params): Query<HashMap<String, String>>) -> Html<String> {
    let message = params.get("error").map(String::as_str).unwrap_or("?");
    Html(format!(
        "<!doctype html><html><body><p>Login failed: {}</p></body></html>",
        escape(message)
    ))
}

// Query values end up inside markup, so angle brackets must not survive.
fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
