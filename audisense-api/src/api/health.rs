//! Liveness endpoint
//!
//! Reports the running build and how many hearing tests the volatile store
//! currently holds, so a restart (which empties the store) is visible.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    /// Short git hash captured by build.rs
    pub build: &'static str,
    pub hearing_tests: usize,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let hearing_tests = state.service.list_all().await?.len();

    Ok(Json(HealthResponse {
        status: "ok",
        module: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        build: env!("GIT_HASH"),
        hearing_tests,
    }))
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
