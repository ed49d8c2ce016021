//! HTTP server lifecycle.
//!
//! Binds the configured address, mounts `api_router()` and serves until
//! Ctrl-C. A CORS layer is added when allowed origins are configured,
//! so a browser frontend on another port can call the API.

use std::sync::Arc;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::router::api_router;
use crate::app_state::AppState;
use crate::config::Config;

/// Build the application router, with CORS when origins are configured.
pub fn build_app(state: Arc<AppState>, allowed_origins: &[String]) -> Router {
    let app = api_router(state);
    match cors_layer(allowed_origins) {
        Some(cors) => app.layer(cors),
        None => app,
    }
}

/// Serve the API until the process receives Ctrl-C.
pub async fn serve(state: Arc<AppState>, config: &Config) -> Result<(), String> {
    let app = build_app(state, &config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .map_err(|e| format!("Failed to bind {}: {e}", config.bind_addr))?;
    let addr = listener
        .local_addr()
        .map_err(|e| format!("Failed to get server address: {e}"))?;

    tracing::info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("Server error: {e}"))?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

/// Browser credentials are allowed, so origins must be listed
/// explicitly; a wildcard never applies.
fn cors_layer(allowed_origins: &[String]) -> Option<CorsLayer> {
    if allowed_origins.is_empty() {
        return None;
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring unparsable CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([AUTHORIZATION, CONTENT_TYPE])
            .allow_credentials(true),
    )
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            // Without a signal handler the server simply runs until killed
            tracing::error!("Cannot listen for shutdown signal: {e}");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::config::DEFAULT_OPENAI_MODEL;
    use crate::recommend::DoctorRecommender;

    fn test_state() -> (Arc<AppState>, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        let db_path = tmp.path().join("medibook.db");

        let mut conn = crate::db::open_database(&db_path).unwrap();
        crate::db::seed_demo_roster(&mut conn).unwrap();
        drop(conn);

        let recommender = DoctorRecommender::new(None, DEFAULT_OPENAI_MODEL);
        (Arc::new(AppState::new(db_path, recommender)), tmp)
    }

    #[test]
    fn cors_layer_is_off_without_origins() {
        assert!(cors_layer(&[]).is_none());
    }

    #[test]
    fn cors_layer_skips_unparsable_origins() {
        // A control character makes the origin an invalid header value
        assert!(cors_layer(&["bad\norigin".to_string()]).is_none());
    }

    #[tokio::test]
    async fn preflight_allows_a_configured_origin() {
        let (state, _tmp) = test_state();
        let app = build_app(state, &["http://localhost:5173".to_string()]);

        let req = Request::builder()
            .method("OPTIONS")
            .uri("/api/doctors")
            .header("Origin", "http://localhost:5173")
            .header("Access-Control-Request-Method", "GET")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();

        assert!(response.status().is_success());
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .unwrap(),
            "http://localhost:5173"
        );
    }

    #[tokio::test]
    async fn requests_without_origin_pass_through_cors() {
        let (state, _tmp) = test_state();
        let app = build_app(state, &["http://localhost:5173".to_string()]);

        let req = Request::builder()
            .method("GET")
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get("access-control-allow-origin")
            .is_none());
    }

    #[tokio::test]
    async fn serves_health_over_a_real_socket() {
        let (state, _tmp) = test_state();
        let app = build_app(state, &[]);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let resp = reqwest::get(format!("http://{addr}/api/health"))
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        let json: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(json["status"], "ok");

        server.abort();
    }
}
