//! Quarterly case-statistics API server library.
//!
//! Exposes the building blocks (config, error handling, routes, router) so integration tests and the binary entrypoint can both use them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
