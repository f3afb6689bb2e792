//! Middleware helpers used by the router.
//!
//! - [`panic::panic_response`] -- Renders a caught handler panic as an
//!   `error` envelope.

pub mod panic;
