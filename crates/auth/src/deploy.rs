//! Externally visible host resolution.
//!
//! The app may sit behind a proxy or load balancer on a different host and
//! port than it binds to, so the callback URL sent to the provider cannot be
//! derived from the listening socket.

use axum::http::{header, HeaderMap};
use url::Url;

/// Supplies the externally visible `scheme://host[:port]` prefix used to
/// build provider callback URLs.
pub trait DeploymentEnvironment: Send + Sync {
    fn redirect_host(&self, headers: &HeaderMap) -> String;
}

/// Fixed host taken from configuration. The right choice when the public
/// address is known at deploy time.
#[derive(Debug, Clone)]
pub struct StaticHost {
    host: String,
}

impl StaticHost {
    pub fn new(base_url: &Url) -> Self {
        Self {
            host: base_url.as_str().trim_end_matches('/').to_string(),
        }
    }
}

impl DeploymentEnvironment for StaticHost {
    fn redirect_host(&self, _headers: &HeaderMap) -> String {
        self.host.clone()
    }
}

/// Host taken from proxy headers, falling back to the configured base URL
/// when the request carries none.
#[derive(Debug, Clone)]
pub struct ForwardedHost {
    fallback: StaticHost,
}

impl ForwardedHost {
    pub fn new(base_url: &Url) -> Self {
        Self {
            fallback: StaticHost::new(base_url),
        }
    }
}

impl DeploymentEnvironment for ForwardedHost {
    fn redirect_host(&self, headers: &HeaderMap) -> String {
        let proto = headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("http");

        let host = headers
            .get("x-forwarded-host")
            .or_else(|| headers.get(header::HOST))
            .and_then(|v| v.to_str().ok());

        match host {
            Some(host) => format!("{proto}://{host}"),
            None => self.fallback.redirect_host(headers),
        }
    }
}
