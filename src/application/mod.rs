//! Application layer services implementing business logic.
//!
//! Services consume repository traits and give HTTP handlers and the admin
//! CLI a single entry point for every registry operation.
//!
//! - [`services::RegistryService`] - Shorten, resolve with visit tracking, analytics

pub mod services;
