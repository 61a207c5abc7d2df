use std::time::Duration;

use axum::{http::StatusCode, routing::get, Router};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use gatehouse_auth::{auth_routes, AuthState};

use crate::handlers::{error_landing, index, livez, login_landing, logout_landing};

/// Create the application router: the landing pages the dispatcher redirects
/// to, plus the dispatcher itself nested under the configured prefix.
pub fn create_app(state: AuthState) -> Router {
    let prefix = state.config.prefix.clone();

    Router::new()
        .route("/", get(index))
        .route("/livez", get(livez))
        .route("/login.html", get(login_landing))
        .route("/logout.html", get(logout_landing))
        .route("/error.html", get(error_landing))
        .nest(&prefix, auth_routes())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use url::Url;

    use gatehouse_auth::{
        AuthConfig, AuthState, GoogleConnector, ProviderConfig, SessionStore, SimplePageMapper,
        StaticHost,
    };

    use super::*;

    fn test_state() -> AuthState {
        let config = AuthConfig {
            app_name: "gatehouse".to_string(),
            prefix: "/auth".to_string(),
            base_url: Url::parse("http://localhost:3000").unwrap(),
            cookie_secure: false,
            google: None,
            github: None,
        };
        let deploy = Arc::new(StaticHost::new(&config.base_url));
        let mut state = AuthState::new(
            config,
            SessionStore::spawn(),
            Arc::new(SimplePageMapper::default()),
            deploy,
        );
        state.add_provider(Arc::new(
            GoogleConnector::new(&ProviderConfig {
                client_id: "test-client".to_string(),
                client_secret: "test-secret".to_string(),
            })
            .unwrap(),
        ));
        state
    }

    #[tokio::test]
    async fn livez_returns_ok() {
        let app = create_app(test_state());

        let response = app
            .oneshot(Request::builder().uri("/livez").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn index_lists_login_links() {
        let app = create_app(test_state());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("/auth/google/login"));
    }

    #[tokio::test]
    async fn nested_dispatcher_handles_login() {
        let app = create_app(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/auth/google/login?state=s1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        let location = response
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap();
        let url = Url::parse(location).unwrap();
        assert_eq!(url.host_str(), Some("accounts.google.com"));
        assert!(location.contains("state=s1"));
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let app = create_app(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/auth/nope/login")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
