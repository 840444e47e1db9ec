//! # Airwatch Server
//!
//! HTTP/WebSocket surface over the surveillance engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Axum HTTP Server                        │
//! │      GET /ws (snapshot stream) · POST/DELETE /feed/...      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │ EngineHandle commands
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     airwatch-engine                         │
//! │      Registry → motion → detector → Snapshot → fan-out      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The wire format toward viewers is one JSON message per tick with the
//! two fields `planes` and `alerts`, exactly the serde form of
//! [`airwatch_domain::Snapshot`].

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod ws;

use std::time::Duration;

use airwatch_domain::Aircraft;
use airwatch_engine::EngineHandle;
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use error::{ServerError, ServerResult};

/// Application state for Axum handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: EngineHandle,
    pub ws_send_timeout: Duration,
}

/// `POST /feed/aircraft` — submit an aircraft report. Applied at the next
/// tick boundary; malformed reports are refused with a 400 and an error
/// body, never clamped.
pub async fn upsert_aircraft(
    State(state): State<AppState>,
    Json(aircraft): Json<Aircraft>,
) -> ServerResult<StatusCode> {
    state.engine.upsert(aircraft).await?;
    Ok(StatusCode::ACCEPTED)
}

/// `DELETE /feed/aircraft/{callsign}` — take an aircraft out of coverage.
/// Idempotent; the body reports whether the callsign was tracked.
pub async fn remove_aircraft(
    State(state): State<AppState>,
    Path(callsign): Path<String>,
) -> ServerResult<impl IntoResponse> {
    let removed = state.engine.remove(&callsign).await?;
    Ok(Json(serde_json::json!({ "removed": removed })))
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    "OK"
}

/// Build the Axum router
pub fn build_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        // Viewer stream
        .route("/ws", get(ws::ws_handler))
        // Feed-ingestion boundary
        .route("/feed/aircraft", post(upsert_aircraft))
        .route("/feed/aircraft/{callsign}", delete(remove_aircraft))
        // Health check
        .route("/health", get(health_check))
        .route("/", get(|| async { "Airwatch Surveillance API" }))
        // State and middleware
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use airwatch_engine::{Engine, EngineConfig};
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        AppState {
            engine: Engine::spawn(EngineConfig {
                tick_period: Duration::from_millis(10),
                ..EngineConfig::default()
            }),
            ws_send_timeout: Duration::from_secs(1),
        }
    }

    fn report(callsign: &str, latitude: f64) -> String {
        format!(
            r#"{{"callsign":"{callsign}","aircraft_type":"A320","latitude":{latitude},"longitude":14.19,"altitude_ft":18000.0,"speed_kn":420.0,"heading_deg":90.0}}"#
        )
    }

    #[tokio::test]
    async fn health_endpoint_answers_ok() {
        let app = build_router(test_state());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn valid_report_is_accepted() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::post("/feed/aircraft")
                    .header("content-type", "application/json")
                    .body(Body::from(report("AUA123", 48.24)))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn out_of_range_report_is_refused_with_error_body() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::post("/feed/aircraft")
                    .header("content-type", "application/json")
                    .body(Body::from(report("AUA123", 91.0)))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "REJECTED_REPORT");
    }

    #[tokio::test]
    async fn removing_unknown_callsign_is_idempotent() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::delete("/feed/aircraft/NOPE99")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["removed"], false);
    }
}
