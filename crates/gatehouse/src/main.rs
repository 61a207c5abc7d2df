mod app;
mod handlers;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gatehouse_auth::{
    AuthConfig, AuthState, ForwardedHost, GitHubConnector, GoogleConnector, SessionStore,
    SimplePageMapper,
};

use crate::app::create_app;

/// Gatehouse - Login with a provider, get a session cookie
#[derive(Parser, Debug)]
#[command(name = "gatehouse")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "3000", env = "PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gatehouse=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AuthConfig::from_env()?;
    let state = build_auth_state(config)?;

    // Build the application router
    let app = create_app(state);

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        // If we are given a tcp listener on listen fd 0, use that one
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        // Otherwise fall back to CLI-specified host:port
        None => {
            let addr = format!("{}:{}", cli.host, cli.port);
            TcpListener::bind(&addr).await?
        }
    };

    tracing::info!("listening on {}", listener.local_addr()?);

    // Run the server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wire the session store, page mapper, deployment environment, and every
/// configured provider into the dispatcher state.
fn build_auth_state(config: AuthConfig) -> Result<AuthState> {
    let store = SessionStore::spawn();
    let pages = Arc::new(SimplePageMapper::default());
    let deploy = Arc::new(ForwardedHost::new(&config.base_url));

    let google = config.google.clone();
    let github = config.github.clone();

    let mut state = AuthState::new(config, store, pages, deploy);

    if let Some(ref provider) = google {
        state.add_provider(Arc::new(GoogleConnector::new(provider)?));
    }
    if let Some(ref provider) = github {
        state.add_provider(Arc::new(GitHubConnector::new(provider)?));
    }

    #[cfg(feature = "mock")]
    {
        let idp_url = url::Url::parse("http://localhost:3001")?;
        state.add_provider(Arc::new(gatehouse_auth::MockConnector::new(
            "mock", idp_url,
        )));
    }

    Ok(state)
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}
