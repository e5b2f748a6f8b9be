//! audisense-api library - hearing test records API
//!
//! REST handler → service → repository → in-memory store.

use std::sync::Arc;

use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod service;
pub mod store;

pub use crate::error::{ApiError, ApiResult};
pub use crate::service::HearingTestService;
pub use crate::store::{HearingTestRepository, InMemoryHearingTestStore};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub service: HearingTestService,
}

impl AppState {
    pub fn new(service: HearingTestService) -> Self {
        Self { service }
    }

    /// State backed by a fresh, empty in-memory store
    pub fn in_memory() -> Self {
        let store: Arc<dyn HearingTestRepository> = Arc::new(InMemoryHearingTestStore::new());
        Self::new(HearingTestService::new(store))
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let hearing_tests = Router::new()
        .route(
            "/api/hearingtests",
            get(api::list_hearing_tests).post(api::create_hearing_test),
        )
        .route(
            "/api/hearingtests/:id",
            get(api::get_hearing_test)
                .put(api::update_hearing_test)
                .delete(api::delete_hearing_test),
        );

    Router::new()
        .merge(hearing_tests)
        .merge(api::health_routes())
        .with_state(state)
        // Handler panics become 500 responses instead of dropped connections
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
