//! Cookie binding between browser cookies and stored sessions.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use thiserror::Error;

use gatehouse_core::auth::{AccessToken, AuthError, Result, Session, SessionId};

use crate::sessions::SessionStore;

/// Failure modes when reading the session cookie. "Missing" is an ordinary
/// absent-session condition; anything else is a hard failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CookieError {
    #[error("no session cookie")]
    Missing,

    #[error("malformed session cookie")]
    Malformed,
}

/// Bridges opaque cookie values to store-backed sessions and manages the
/// `Set-Cookie` lifecycle.
#[derive(Debug, Clone)]
pub struct CookieBinder {
    cookie_name: String,
    secure: bool,
    store: SessionStore,
}

impl CookieBinder {
    /// The cookie name is derived from the application name so two apps on
    /// the same host do not clobber each other's sessions.
    pub fn new(app_name: &str, secure: bool, store: SessionStore) -> Self {
        Self {
            cookie_name: format!("{app_name}_session"),
            secure,
            store,
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Extract the session id from the request's cookies.
    pub fn value(&self, jar: &CookieJar) -> std::result::Result<SessionId, CookieError> {
        let cookie = jar.get(&self.cookie_name).ok_or(CookieError::Missing)?;
        let value = cookie.value();
        if value.is_empty() {
            return Err(CookieError::Malformed);
        }
        Ok(SessionId::new(value.to_string()))
    }

    /// Create a session for a freshly authenticated browser. The token and
    /// code are available to richer implementations; the default store only
    /// records the provider.
    pub async fn generate(
        &self,
        provider: &str,
        _token: &AccessToken,
        _code: &str,
    ) -> Result<Session> {
        self.store.generate(provider).await
    }

    /// Set the session cookie on the response.
    pub fn associate(&self, jar: CookieJar, session: &Session) -> CookieJar {
        // No max_age: sessions have no TTL, so the cookie lives for the
        // browser session.
        let cookie = Cookie::build((self.cookie_name.clone(), session.id.to_string()))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .build();

        jar.add(cookie)
    }

    /// Clear the session cookie: empty value, immediate expiry.
    pub fn remove(&self, jar: CookieJar) -> CookieJar {
        let mut cookie = Cookie::from(self.cookie_name.clone());
        cookie.set_path("/");
        jar.remove(cookie)
    }

    /// Destroy the session the request's cookie points at. An absent cookie
    /// is a no-op; a malformed one is a hard failure.
    pub async fn destroy(&self, jar: &CookieJar) -> Result<()> {
        match self.value(jar) {
            Ok(id) => self.store.destroy(&id).await,
            Err(CookieError::Missing) => Ok(()),
            Err(CookieError::Malformed) => Err(AuthError::MalformedCookie),
        }
    }
}
