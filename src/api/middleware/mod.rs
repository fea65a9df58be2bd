//! HTTP middleware for request processing.
//!
//! Provides cross-origin policy and observability middleware.

pub mod cors;
pub mod tracing;
