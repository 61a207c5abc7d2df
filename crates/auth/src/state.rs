//! Shared state for the auth dispatcher.

use std::sync::Arc;

use axum::http::HeaderMap;

use gatehouse_core::auth::{PageMapper, ProviderConnector};

use crate::config::AuthConfig;
use crate::cookies::CookieBinder;
use crate::deploy::DeploymentEnvironment;
use crate::sessions::SessionStore;

/// Everything a dispatch handler needs: the provider registry, cookie
/// binder, page mapper, and deployment environment.
///
/// The registry is append-only during startup and read-only afterwards, so
/// the whole state is safe to clone into concurrent request tasks.
#[derive(Clone)]
pub struct AuthState {
    providers: Vec<Arc<dyn ProviderConnector>>,
    pub cookies: CookieBinder,
    pub pages: Arc<dyn PageMapper>,
    pub deploy: Arc<dyn DeploymentEnvironment>,
    pub config: AuthConfig,
}

impl AuthState {
    pub fn new(
        config: AuthConfig,
        store: SessionStore,
        pages: Arc<dyn PageMapper>,
        deploy: Arc<dyn DeploymentEnvironment>,
    ) -> Self {
        let cookies = CookieBinder::new(&config.app_name, config.cookie_secure, store);
        Self {
            providers: Vec::new(),
            cookies,
            pages,
            deploy,
            config,
        }
    }

    /// Register a provider. Registering two providers with the same name is
    /// a programmer error.
    pub fn add_provider(&mut self, provider: Arc<dyn ProviderConnector>) {
        assert!(
            self.provider(provider.name()).is_none(),
            "provider '{}' registered twice",
            provider.name()
        );
        tracing::info!(provider = provider.name(), "registered auth provider");
        self.providers.push(provider);
    }

    /// Look up a provider by its route-segment name.
    pub fn provider(&self, name: &str) -> Option<&Arc<dyn ProviderConnector>> {
        self.providers.iter().find(|p| p.name() == name)
    }

    /// Registered providers, in registration order.
    pub fn providers(&self) -> impl Iterator<Item = &Arc<dyn ProviderConnector>> {
        self.providers.iter()
    }

    /// The callback URL the provider redirects back to, resolved against the
    /// externally visible host.
    pub fn callback_url(&self, headers: &HeaderMap, provider: &str) -> String {
        format!(
            "{}{}/{}/callback",
            self.deploy.redirect_host(headers),
            self.config.prefix,
            provider
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deploy::StaticHost;
    use crate::pages::SimplePageMapper;
    use url::Url;

    fn state() -> AuthState {
        let config = AuthConfig {
            app_name: "acme".to_string(),
            prefix: "/auth".to_string(),
            base_url: Url::parse("http://localhost:3000").unwrap(),
            cookie_secure: false,
            google: None,
            github: None,
        };
        let deploy = Arc::new(StaticHost::new(&config.base_url));
        AuthState::new(
            config,
            SessionStore::spawn(),
            Arc::new(SimplePageMapper::default()),
            deploy,
        )
    }

    #[tokio::test]
    async fn callback_url_joins_host_prefix_and_provider() {
        let state = state();

        assert_eq!(
            state.callback_url(&HeaderMap::new(), "google"),
            "http://localhost:3000/auth/google/callback"
        );
    }

    #[tokio::test]
    async fn provider_lookup_is_by_name() {
        let state = state();

        assert!(state.provider("google").is_none());
    }
}
