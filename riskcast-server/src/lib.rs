//! HTTP proxy service for the `riskcast` weather-risk planner.
//!
//! Exposes the two boundary routes the browser/CLI clients talk to,
//! keeping upstream credentials and addresses on the server side.

pub mod error;
pub mod routes;

pub use error::ApiError;
pub use routes::{AppState, router};
