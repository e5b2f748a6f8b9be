//! HTTP API handlers for audisense-api

pub mod health;
pub mod hearing_tests;

pub use health::health_routes;
pub use hearing_tests::{
    create_hearing_test, delete_hearing_test, get_hearing_test, list_hearing_tests,
    update_hearing_test,
};
