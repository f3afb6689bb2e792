//! Reporting dashboard data service.
//!
//! Pulls case records from the read API, shapes them into chart series with
//! [`quarterly_core::dashboard`] and serves the series as JSON.

pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod state;
