//! HTTP dispatch for the login protocol.
//!
//! Routes `{prefix}/{provider}/{login|logout|callback}` requests to the
//! matching protocol step. Every flow, success or failure, terminates in a
//! redirect; the only non-redirect outcomes are 404 for paths that name no
//! registered provider or action, and a hard failure for an unreadable
//! session cookie.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use axum_extra::extract::CookieJar;

use gatehouse_core::auth::ProviderConnector;

use crate::error::DispatchError;
use crate::state::AuthState;

/// Creates the dispatcher router.
///
/// A single route serves every provider and action; the registry lookup
/// happens per request so providers registered at startup need no routes of
/// their own. Nest this under the configured prefix:
///
/// ```ignore
/// Router::new().nest(&config.prefix, auth_routes().with_state(auth_state))
/// ```
pub fn auth_routes() -> Router<AuthState> {
    Router::new().route("/{provider}/{action}", get(dispatch))
}

async fn dispatch(
    State(state): State<AuthState>,
    Path((provider, action)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<Response, DispatchError> {
    let conn = state
        .provider(&provider)
        .cloned()
        .ok_or_else(|| DispatchError::Routing(format!("{provider}/{action}")))?;

    match action.as_str() {
        "login" => login(&state, conn.as_ref(), &params, &headers),
        "logout" => logout(&state, conn.as_ref(), jar).await,
        "callback" => callback(&state, conn.as_ref(), &params, &headers, jar).await,
        _ => Err(DispatchError::Routing(format!("{provider}/{action}"))),
    }
}

/// First protocol step: send the browser to the provider's authorization
/// endpoint. The client-supplied `state` is passed through opaquely; no
/// session or cookie is touched.
fn login(
    state: &AuthState,
    conn: &dyn ProviderConnector,
    params: &HashMap<String, String>,
    headers: &HeaderMap,
) -> Result<Response, DispatchError> {
    let client_state = params
        .get(conn.state_param())
        .map(String::as_str)
        .unwrap_or("");

    let callback_url = state.callback_url(headers, conn.name());
    let url = conn.auth_url(&callback_url, client_state).map_err(|err| {
        tracing::error!(provider = conn.name(), error = %err, "failed to build authorization URL");
        DispatchError::Auth(err)
    })?;

    tracing::debug!(provider = conn.name(), "redirecting to provider");
    Ok(found(url.as_str()))
}

/// Provider redirected back to us. A non-empty error parameter short
/// circuits to the error page without touching cookie or store.
async fn callback(
    state: &AuthState,
    conn: &dyn ProviderConnector,
    params: &HashMap<String, String>,
    headers: &HeaderMap,
    jar: CookieJar,
) -> Result<Response, DispatchError> {
    let refusal = params
        .get(conn.error_param())
        .map(String::as_str)
        .unwrap_or("");
    if !refusal.is_empty() {
        tracing::debug!(
            provider = conn.name(),
            error = refusal,
            "provider refused authorization"
        );
        let page = state.pages.error_page(conn.name(), refusal);
        return Ok(Redirect::temporary(&page).into_response());
    }

    let code = params
        .get(conn.code_param())
        .map(String::as_str)
        .unwrap_or("");

    connect(state, conn, code, params, headers, jar).await
}

/// Exchange the authorization code for a token, mint a session, bind the
/// cookie, and land. Each failure branch redirects to the error page with
/// the store and cookie untouched.
async fn connect(
    state: &AuthState,
    conn: &dyn ProviderConnector,
    code: &str,
    params: &HashMap<String, String>,
    headers: &HeaderMap,
    jar: CookieJar,
) -> Result<Response, DispatchError> {
    let callback_url = state.callback_url(headers, conn.name());

    let token = match conn.exchange_for_token(&callback_url, code).await {
        Ok(token) => token,
        Err(err) => {
            tracing::warn!(provider = conn.name(), error = %err, "token exchange failed");
            let message = format!(
                "unable to finish the token exchange with {}: {}",
                conn.name(),
                err
            );
            let page = state.pages.error_page(conn.name(), &message);
            return Ok(Redirect::temporary(&page).into_response());
        }
    };

    let client_state = params
        .get(conn.state_param())
        .map(String::as_str)
        .unwrap_or("");

    let session = match state.cookies.generate(conn.name(), &token, code).await {
        Ok(session) => session,
        Err(err) => {
            tracing::error!(provider = conn.name(), error = %err, "session creation failed");
            let page = state.pages.error_page(conn.name(), "failed to create session");
            return Ok(Redirect::temporary(&page).into_response());
        }
    };

    tracing::debug!(provider = conn.name(), session = %session.id, "login complete");

    let jar = state.cookies.associate(jar, &session);
    let landing = state
        .pages
        .login_landing_page(conn.name(), client_state, code);
    Ok((jar, Redirect::temporary(&landing)).into_response())
}

/// Clear the cookie and destroy the session. Fails open: an absent cookie
/// or a session nobody remembers still ends at the logout landing page.
async fn logout(
    state: &AuthState,
    conn: &dyn ProviderConnector,
    jar: CookieJar,
) -> Result<Response, DispatchError> {
    state.cookies.destroy(&jar).await?;
    let jar = state.cookies.remove(jar);

    let landing = state.pages.logout_landing_page(conn.name());
    Ok((jar, Redirect::temporary(&landing)).into_response())
}

/// 302, the status the provider handshake expects for the outbound hop.
fn found(location: &str) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, location.to_string())],
    )
        .into_response()
}
