//! # API Shared
//!
//! Shared request/response types for the symptom checker APIs.
//!
//! Contains:
//! - Wire types (`dto` module) with OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and the `symptom-run` binary.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
