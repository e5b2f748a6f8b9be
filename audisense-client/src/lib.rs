//! audisense-client library - terminal client for the hearing test API
//!
//! Presenter → record controller → data gateway → HTTP.

pub mod cli;
pub mod controller;
pub mod gateway;
pub mod item;
pub mod navigation;
pub mod presentation;
pub mod render;
pub mod shell;

#[cfg(test)]
mod test_support;

pub use crate::controller::HearingTestClient;
pub use crate::gateway::{DataGateway, HttpDataGateway};
pub use crate::presentation::{FormAction, HearingTestsPresenter, Mode};
