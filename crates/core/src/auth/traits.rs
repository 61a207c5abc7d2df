use async_trait::async_trait;
use url::Url;

use super::{AccessToken, AuthError};

/// Result type for auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Abstraction over a single OAuth2 provider.
///
/// A connector knows how to build the provider's authorization URL and how
/// to exchange an authorization code for a token. It is immutable after
/// construction and safe to share across concurrent requests.
#[async_trait]
pub trait ProviderConnector: Send + Sync {
    /// Stable identifier, used verbatim as a route segment and in error
    /// messages. Must be unique within a dispatcher.
    fn name(&self) -> &str;

    /// Query-parameter name the provider uses for the opaque client state.
    fn state_param(&self) -> &str {
        "state"
    }

    /// Query-parameter name the provider uses for the authorization code.
    fn code_param(&self) -> &str {
        "code"
    }

    /// Query-parameter name the provider uses to report a refusal.
    fn error_param(&self) -> &str {
        "error"
    }

    /// Build the provider's authorization endpoint URL, embedding the
    /// configured client id, the requested scopes, `redirect_uri` and
    /// `state`. Pure function of its inputs plus static configuration.
    fn auth_url(&self, callback_url: &str, state: &str) -> Result<Url>;

    /// Exchange an authorization code for a token. The only network I/O in
    /// the core; a single failure is final, there is no retry.
    async fn exchange_for_token(&self, callback_url: &str, code: &str) -> Result<AccessToken>;
}

/// Supplies the landing-page URLs the login flow terminates on.
pub trait PageMapper: Send + Sync {
    /// Destination after a successful login. `state` and `code` are echoed
    /// through from the callback request.
    fn login_landing_page(&self, provider: &str, state: &str, code: &str) -> String;

    /// Destination when the provider refuses or the exchange fails.
    fn error_page(&self, provider: &str, message: &str) -> String;

    /// Destination after logout.
    fn logout_landing_page(&self, provider: &str) -> String;
}
