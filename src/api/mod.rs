//! HTTP surface: axum router, extractors and error mapping.

pub mod caller;
pub mod error;
pub mod routes;

use crate::config::ServerConfig;
use crate::mediator::Mediator;
use axum::http::StatusCode;
use axum::middleware::map_response;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use caller::{ApiJson, ApiPath, ApiQuery};
pub use error::ErrorBody;

/// State shared by every route.
#[derive(Clone)]
pub struct AppState {
    pub mediator: Mediator,
}

impl AppState {
    pub fn new(mediator: Mediator) -> Self {
        Self { mediator }
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Give the timeout layer's bare 408 the usual error body.
async fn timeout_body(response: Response) -> Response {
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }
    tracing::warn!("request timed out");
    let body = ErrorBody {
        message: "Request timed out".to_string(),
        errors: None,
    };
    (StatusCode::REQUEST_TIMEOUT, Json(body)).into_response()
}

/// Build the application router with tracing and timeout layers.
pub fn router(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", routes::api_routes())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            server.request_timeout(),
        ))
        .layer(map_response(timeout_body))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve `app` on `listener` until ctrl-c.
pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "listening");
    }
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install ctrl-c handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining connections");
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_timeout_gets_error_body() {
        let response = timeout_body(StatusCode::REQUEST_TIMEOUT.into_response()).await;
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Request timed out");
        assert!(body.get("errors").is_none());
    }

    #[tokio::test]
    async fn test_other_responses_pass_through() {
        let response = timeout_body(health().await.into_response()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }
}
