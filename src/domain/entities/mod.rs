//! Core domain entities.
//!
//! - [`LinkRecord`] - A short identifier mapped to a target URL, with visits
//! - [`VisitEvent`] - One served redirect
//!
//! `NewLink` is the creation input for a [`LinkRecord`].

pub mod link;
pub mod visit;

pub use link::{LinkRecord, NewLink};
pub use visit::VisitEvent;
