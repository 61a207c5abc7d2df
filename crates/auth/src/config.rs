use url::Url;

/// Configuration for a single OAuth2 provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub client_id: String,
    pub client_secret: String,
}

/// Complete auth configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Application identity; the session cookie name derives from it.
    pub app_name: String,
    /// Route prefix the dispatcher is mounted at, without trailing slash.
    pub prefix: String,
    /// Externally visible base URL, used when no proxy headers apply.
    pub base_url: Url,
    pub cookie_secure: bool,
    pub google: Option<ProviderConfig>,
    pub github: Option<ProviderConfig>,
}

impl AuthConfig {
    /// Load from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `AUTH_BASE_URL`: Base URL for callback redirects (default: `http://localhost:3000`)
    /// - `AUTH_PREFIX`: Route prefix for the dispatcher (default: `/auth`)
    /// - `APP_NAME`: Application name the cookie name derives from (default: `gatehouse`)
    /// - `GOOGLE_CLIENT_ID`: Google OAuth client ID (optional, enables Google login)
    /// - `GOOGLE_CLIENT_SECRET`: Google OAuth client secret (required if Google enabled)
    /// - `GITHUB_CLIENT_ID`: GitHub OAuth client ID (optional, enables GitHub login)
    /// - `GITHUB_CLIENT_SECRET`: GitHub OAuth client secret (required if GitHub enabled)
    /// - `COOKIE_SECURE`: Whether to set the secure flag on cookies (default: true)
    ///
    /// # Errors
    ///
    /// Returns an error if a provider is partially configured (client ID
    /// without secret).
    pub fn from_env() -> Result<Self, std::env::VarError> {
        let base_url: Url = std::env::var("AUTH_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .parse()
            .expect("AUTH_BASE_URL must be valid URL");

        let prefix = std::env::var("AUTH_PREFIX").unwrap_or_else(|_| "/auth".to_string());

        let app_name = std::env::var("APP_NAME").unwrap_or_else(|_| "gatehouse".to_string());

        let google = match std::env::var("GOOGLE_CLIENT_ID") {
            Ok(client_id) => Some(ProviderConfig {
                client_id,
                client_secret: std::env::var("GOOGLE_CLIENT_SECRET")?,
            }),
            Err(_) => None,
        };

        let github = match std::env::var("GITHUB_CLIENT_ID") {
            Ok(client_id) => Some(ProviderConfig {
                client_id,
                client_secret: std::env::var("GITHUB_CLIENT_SECRET")?,
            }),
            Err(_) => None,
        };

        let cookie_secure = std::env::var("COOKIE_SECURE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(true);

        Ok(Self {
            app_name,
            prefix,
            base_url,
            cookie_secure,
            google,
            github,
        })
    }
}
