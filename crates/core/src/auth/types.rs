use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cryptographically random session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-side session record.
///
/// Created only by the session store, destroyed only by the session store,
/// otherwise immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    /// Name of the provider the user authenticated with.
    pub provider: String,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: SessionId, provider: &str) -> Self {
        Self {
            id,
            provider: provider.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Opaque token returned by a provider's code exchange.
#[derive(Clone, Serialize, Deserialize)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: String) -> Self {
        Self(token)
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

// The token must never end up in logs through a stray `{:?}`.
impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccessToken([redacted])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_token_debug_redacts_secret() {
        let token = AccessToken::new("very-secret".to_string());
        let debug = format!("{:?}", token);
        assert!(!debug.contains("very-secret"));
        assert_eq!(token.secret(), "very-secret");
    }

    #[test]
    fn session_records_provider() {
        let session = Session::new(SessionId::new("abc".to_string()), "google");
        assert_eq!(session.id.as_str(), "abc");
        assert_eq!(session.provider, "google");
    }
}
