//! # AudiSense Common Library
//!
//! Shared code for the AudiSense API server and client including:
//! - Hearing test wire types (request, view, draft)
//! - Request field validation
//! - ISO-8601 date-time handling
//! - Configuration loading
//! - Common error type

pub mod config;
pub mod error;
pub mod models;
pub mod time;
pub mod validation;

pub use error::{Error, Result};
pub use models::{HearingTestDraft, HearingTestId, HearingTestRequest, HearingTestView};
pub use validation::ValidationErrors;
