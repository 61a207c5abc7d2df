use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use gatehouse_core::auth::AuthError;

/// Errors a dispatch handler can terminate with.
///
/// Protocol-level failures (provider refusal, failed exchange, failed
/// session creation) are not represented here: those terminate in redirects
/// to the error page, per the login protocol.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The request path named no registered provider or action.
    #[error("could not dispatch authentication URL: {0}")]
    Routing(String),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            DispatchError::Routing(_) => (StatusCode::NOT_FOUND, self.to_string()),
            DispatchError::Auth(AuthError::MalformedCookie) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            DispatchError::Auth(_) => {
                tracing::error!("auth dispatch error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, message).into_response()
    }
}
