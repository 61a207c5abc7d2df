//! GitHub OAuth2 connector.

use async_trait::async_trait;
use oauth2::{
    basic::BasicClient, reqwest::async_http_client, AuthUrl, AuthorizationCode, ClientId,
    ClientSecret, CsrfToken, RedirectUrl, Scope, TokenResponse, TokenUrl,
};
use url::Url;

use gatehouse_core::auth::{AccessToken, AuthError, ProviderConnector, Result};

use crate::config::ProviderConfig;

const AUTH_URL: &str = "https://github.com/login/oauth/authorize";
const TOKEN_URL: &str = "https://github.com/login/oauth/access_token";

/// GitHub connector. Same handshake as Google, different endpoints and a
/// narrower default scope.
pub struct GitHubConnector {
    client: BasicClient,
}

impl GitHubConnector {
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
impl ProviderConnector for GitHubConnector {
    fn name(&self) -> &str {
        "github"
    }

    fn auth_url(&self, callback_url: &str, state: &str) -> Result<Url> {
        let client = self.client_for(callback_url)?;

        let state = state.to_string();
        let (url, _csrf) = client
            .authorize_url(move || CsrfToken::new(state))
            .add_scope(Scope::new("read:user".to_string()))
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

    #[test]
    fn auth_url_targets_github() {
        let conn = GitHubConnector::new(&ProviderConfig {
            client_id: "gh-id".to_string(),
            client_secret: "gh-secret".to_string(),
        })
        .unwrap();

        let url = conn
            .auth_url("http://localhost:3000/auth/github/callback", "s1")
            .unwrap();

        assert_eq!(url.host_str(), Some("github.com"));
        assert_eq!(url.path(), "/login/oauth/authorize");

        let query: HashMap<String, String> = url.query_pairs().into_owned().collect();
        assert_eq!(query["client_id"], "gh-id");
        assert_eq!(query["state"], "s1");
        assert_eq!(query["scope"], "read:user");
    }
}
