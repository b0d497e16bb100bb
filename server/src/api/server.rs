//! API server initialization

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tokio::net::TcpListener;

use super::middleware::{self, AllowedOrigins};
use super::routes::health;
use super::routes::metrics::{self, MetricsApiState};
use crate::core::CoreApp;
use crate::core::constants::DEFAULT_BODY_LIMIT;

pub struct ApiServer {
    app: CoreApp,
    allowed_origins: AllowedOrigins,
}

impl ApiServer {
    pub fn new(app: CoreApp) -> Self {
        let allowed_origins = AllowedOrigins::new(&app.config.server.host, app.config.server.port);
        Self {
            app,
            allowed_origins,
        }
    }

    /// Build the application router
    pub fn router(&self) -> Router<()> {
        let metrics_routes = metrics::routes(MetricsApiState {
            compiler: Arc::clone(&self.app.compiler),
            table: Arc::new(self.app.config.query.table.clone()),
            max_filter_items: self.app.config.query.max_filter_items,
        });

        Router::new()
            .route("/api/v1/health", get(health::health))
            .nest("/api/v1/metrics", metrics_routes)
            .fallback(middleware::handle_404)
            .layer(middleware::cors(&self.allowed_origins))
            .layer(DefaultBodyLimit::max(DEFAULT_BODY_LIMIT))
    }

    /// Serve until shutdown is triggered
    pub async fn start(self) -> Result<()> {
        let host = &self.app.config.server.host;
        let port = self.app.config.server.port;
        let addr = SocketAddr::new(
            host.parse()
                .with_context(|| format!("Invalid server host: {}", host))?,
            port,
        );

        let router = self.router();
        let shutdown = self.app.shutdown.clone();

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::info!(
            address = %addr,
            dialect = %self.app.config.query.backend,
            "Server listening"
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        tracing::debug!("Server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::core::CliConfig;
    use crate::core::config::{AppConfig, FileConfig};

    fn server() -> ApiServer {
        let config = AppConfig::resolve(&CliConfig::default(), FileConfig::default()).unwrap();
        ApiServer::new(CoreApp::new(config))
    }

    #[tokio::test]
    async fn test_health_route() {
        let response = server()
            .router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_compile_route_is_nested() {
        let response = server()
            .router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/metrics/filter/compile")
                    .body(Body::from(r#"{"metric_name": "up"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_body_over_router_limit_is_413_json() {
        let body = vec![b' '; DEFAULT_BODY_LIMIT + 44 * 1024];
        let response = server()
            .router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/metrics/filter/compile")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(response.headers()["content-type"], "application/json");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "payload_too_large");
        assert_eq!(json["code"], "FILTER_JSON_TOO_LARGE");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404_json() {
        let response = server()
            .router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
    }
}
