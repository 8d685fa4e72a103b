// crates/server/src/lib.rs
//! Branchlog server library.
//!
//! This crate provides the Axum-based HTTP server for the branchlog
//! application: a REST API over the service-request log and branch tables,
//! plus spreadsheet/PDF export and spreadsheet import.

pub mod error;
pub mod routes;
pub mod state;

pub use error::*;
pub use routes::api_routes;
pub use state::AppState;

use axum::Router;
use branchlog_db::Database;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the Axum application with all routes and middleware.
///
/// This sets up:
/// - API routes (health, logs, branches, export, import)
/// - CORS for development (allows any origin)
/// - Request tracing
pub fn create_app(db: Database) -> Router {
    let state = AppState::new(db);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api_routes(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ============================================================================
// Test helpers
// ============================================================================


// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::test_support::{do_delete, do_get, do_post, test_app};
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn health_endpoint_reports_ok() {
        let app = test_app().await;
        let (status, body) = do_get(app, "/api/health").await;

        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert!(json["version"].is_string());
        assert!(json["uptime_secs"].is_number());
    }

    #[tokio::test]
    async fn unknown_routes_are_404() {
        let app = test_app().await;

        let (status, _) = do_get(app.clone(), "/api/nonexistent").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // Without the /api prefix, also 404.
        let (status, _) = do_get(app.clone(), "/logs").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = do_get(app, "/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        use tower::ServiceExt;

        let app = test_app().await;
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/api/health")
                    .header("Origin", "http://example.com")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let allow_origin = response.headers().get("access-control-allow-origin");
        assert!(allow_origin.is_some());
        assert_eq!(allow_origin.unwrap(), "*");
    }

    /// One full form cycle: submit, edit, re-open, delete.
    #[tokio::test]
    async fn form_cycle_end_to_end() {
        let app = test_app().await;

        let (status, body) = do_post(
            app.clone(),
            "/api/logs",
            json!({
                "branchName": "Armadale",
                "dateOfRequest": "2024-05-01",
                "dateOfDelivery": "2024-05-10",
                "surveyCompleted": "No",
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = serde_json::from_str::<Value>(&body).unwrap()["id"]
            .as_i64()
            .unwrap();

        let (status, body) = do_get(app.clone(), &format!("/api/logs/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        let detail: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(detail["surveyRatingVisible"], false);

        let (status, _) = do_delete(app.clone(), &format!("/api/logs/{id}")).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, body) = do_get(app, "/api/logs").await;
        let listed: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(listed["placeholder"], "No records");
    }
}
