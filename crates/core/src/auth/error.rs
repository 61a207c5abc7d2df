use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("provider error: {0}")]
    Provider(String),

    #[error("failed to exchange authorization code: {0}")]
    Exchange(String),

    #[error("session store unavailable")]
    StoreUnavailable,

    #[error("malformed session cookie")]
    MalformedCookie,
}
