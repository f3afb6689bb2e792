//! Pure domain logic for the quarterly case-statistics backend.
//!
//! Validation, aggregation and chart shaping, with no I/O so both the API
//! server and the dashboard can share it.

pub mod aggregate;
pub mod dashboard;
pub mod error;
pub mod pipeline;
pub mod schema;
pub mod types;
