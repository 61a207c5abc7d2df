//! Google OAuth2 connector.

use async_trait::async_trait;
use oauth2::{
    basic::BasicClient, reqwest::async_http_client, AuthUrl, AuthorizationCode, ClientId,
    ClientSecret, CsrfToken, RedirectUrl, Scope, TokenResponse, TokenUrl,
};
use url::Url;

use gatehouse_core::auth::{AccessToken, AuthError, ProviderConnector, Result};

use crate::config::ProviderConfig;

const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Google connector over the standard authorization-code endpoints.
pub struct GoogleConnector {
    client: BasicClient,
}

impl GoogleConnector {
    /// Create a new Google connector from its static configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URLs fail to parse (a build-time
    /// constant going bad, effectively unreachable).
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = BasicClient::new(
            ClientId::new(config.client_id.clone()),
            Some(ClientSecret::new(config.client_secret.clone())),
            AuthUrl::new(AUTH_URL.to_string()).map_err(|e| AuthError::Provider(e.to_string()))?,
            Some(
                TokenUrl::new(TOKEN_URL.to_string())
                    .map_err(|e| AuthError::Provider(e.to_string()))?,
            ),
        );

        Ok(Self { client })
    }

    fn client_for(&self, callback_url: &str) -> Result<BasicClient> {
        Ok(self.client.clone().set_redirect_uri(
            RedirectUrl::new(callback_url.to_string())
                .map_err(|e| AuthError::Provider(e.to_string()))?,
        ))
    }
}

#[async_trait]
impl ProviderConnector for GoogleConnector {
    fn name(&self) -> &str {
        "google"
    }

    fn auth_url(&self, callback_url: &str, state: &str) -> Result<Url> {
        let client = self.client_for(callback_url)?;

        let state = state.to_string();
        let (url, _csrf) = client
            .authorize_url(move || CsrfToken::new(state))
            .add_scope(Scope::new("openid".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .add_scope(Scope::new("profile".to_string()))
            .url();

        Ok(url)
    }

    async fn exchange_for_token(&self, callback_url: &str, code: &str) -> Result<AccessToken> {
        let client = self.client_for(callback_url)?;

        let token = client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(async_http_client)
            .await
            .map_err(|e| AuthError::Exchange(e.to_string()))?;

        Ok(AccessToken::new(token.access_token().secret().clone()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn connector() -> GoogleConnector {
        GoogleConnector::new(&ProviderConfig {
            client_id: "painful".to_string(),
            client_secret: "pustules".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn auth_url_embeds_client_id_state_and_redirect() {
        let url = connector()
            .auth_url("http://localhost:3000/auth/google/callback", "s1")
            .unwrap();

        assert_eq!(url.host_str(), Some("accounts.google.com"));
        assert_eq!(url.path(), "/o/oauth2/v2/auth");

        let query: HashMap<String, String> = url.query_pairs().into_owned().collect();
        assert_eq!(query["client_id"], "painful");
        assert_eq!(query["state"], "s1");
        assert_eq!(
            query["redirect_uri"],
            "http://localhost:3000/auth/google/callback"
        );
        assert!(query["scope"].contains("email"));
    }

    #[test]
    fn auth_url_is_pure() {
        let conn = connector();

        let a = conn.auth_url("http://localhost:3000/cb", "same").unwrap();
        let b = conn.auth_url("http://localhost:3000/cb", "same").unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn name_is_the_route_segment() {
        assert_eq!(connector().name(), "google");
    }
}
