//! Mock connector for development and testing.
//!
//! Generates authorization URLs that point at a configurable fake IdP and
//! exchanges codes without a network: the "code" is base64 JSON carrying the
//! token the exchange should return.

use async_trait::async_trait;
use base64::Engine;
use url::Url;

use gatehouse_core::auth::{AccessToken, AuthError, ProviderConnector, Result};

/// Network-free connector. The fake IdP is expected to redirect straight
/// back to the callback URL with a code produced by [`MockConnector::code`].
pub struct MockConnector {
    name: String,
    idp_url: Url,
}

impl MockConnector {
    pub fn new(name: &str, idp_url: Url) -> Self {
        Self {
            name: name.to_string(),
            idp_url,
        }
    }

    /// Build a code the exchange will accept, the way a real IdP mints one.
    pub fn code(token: &str) -> String {
        base64::engine::general_purpose::STANDARD
            .encode(serde_json::json!({ "token": token }).to_string())
    }
}

#[async_trait]
impl ProviderConnector for MockConnector {
    fn name(&self) -> &str {
        &self.name
    }

    fn auth_url(&self, callback_url: &str, state: &str) -> Result<Url> {
        let mut url = self
            .idp_url
            .join("/authorize")
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        url.query_pairs_mut()
            .append_pair("state", state)
            .append_pair("redirect_uri", callback_url);

        Ok(url)
    }

    async fn exchange_for_token(&self, _callback_url: &str, code: &str) -> Result<AccessToken> {
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(code)
            .map_err(|e| AuthError::Exchange(e.to_string()))?;

        let json: serde_json::Value =
            serde_json::from_slice(&decoded).map_err(|e| AuthError::Exchange(e.to_string()))?;

        match json["token"].as_str() {
            Some(token) => Ok(AccessToken::new(token.to_string())),
            None => Err(AuthError::Exchange("no token in mock code".to_string())),
        }
    }
}
