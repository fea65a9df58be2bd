//! Domain layer: entities and storage contracts.
//!
//! - [`entities`] - Link records and visit events
//! - [`repositories`] - Storage trait implemented by the infrastructure layer
//!
//! The domain layer has no dependency on the HTTP or persistence layers.
//! Business rules live in [`crate::application::services`].

pub mod entities;
pub mod repositories;
