//! OAuth2 login dispatch for gatehouse.
//!
//! This crate provides:
//! - A dispatcher routing `{prefix}/{provider}/{login|logout|callback}`
//!   requests through the authorization-code handshake
//! - A serializing in-memory session store
//! - Cookie binding between browser cookies and sessions
//! - Google and GitHub provider connectors (plus a mock behind the `mock`
//!   feature)

mod config;
mod cookies;
mod deploy;
mod error;
mod handlers;
mod pages;
mod providers;
mod sessions;
mod state;

pub use config::{AuthConfig, ProviderConfig};
pub use cookies::{CookieBinder, CookieError};
pub use deploy::{DeploymentEnvironment, ForwardedHost, StaticHost};
pub use error::DispatchError;
pub use handlers::auth_routes;
pub use pages::SimplePageMapper;
#[cfg(feature = "mock")]
pub use providers::MockConnector;
pub use providers::{GitHubConnector, GoogleConnector};
pub use sessions::SessionStore;
pub use state::AuthState;
