//! HTTP API module - REST endpoints for rolling commands

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::dice::DiceSource;
use crate::system::{LogHorizon, RollResult, SystemInfo};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub system: Arc<LogHorizon>,
    pub dice: Arc<DiceSource>,
}

/// Build the API router
pub fn router(system: Arc<LogHorizon>, dice: Arc<DiceSource>) -> Router {
    let state = AppState { system, dice };

    Router::new()
        .route("/health", get(health_check))
        .route("/", get(root))
        .route("/v1/systeminfo", get(system_info))
        .route("/v1/roll", get(roll))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Root endpoint
async fn root() -> impl IntoResponse {
    Json(RootResponse {
        name: "lhdice",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct RootResponse {
    name: &'static str,
    version: &'static str,
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(HealthResponse { status: "healthy" })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn system_info(State(state): State<AppState>) -> Json<SystemInfo> {
    Json(state.system.info())
}

/// Query string of `/v1/roll`
#[derive(Debug, Deserialize)]
pub struct RollQuery {
    #[serde(default)]
    pub command: String,
}

/// Successful roll
#[derive(Debug, Serialize)]
pub struct RollResponse {
    pub ok: bool,
    #[serde(flatten)]
    pub result: RollResult,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub reason: String,
}

/// Evaluate one command
async fn roll(State(state): State<AppState>, Query(query): Query<RollQuery>) -> impl IntoResponse {
    let result = state
        .dice
        .with_randomizer(|randomizer| state.system.eval(&query.command, randomizer));

    match result {
        Some(result) => {
            info!(command = %query.command, secret = result.secret, "roll");
            (
                StatusCode::OK,
                Json(RollResponse { ok: true, result }),
            )
                .into_response()
        }
        None => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                ok: false,
                reason: "unsupported command".to_string(),
            }),
        )
            .into_response(),
    }
}
