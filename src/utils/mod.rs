//! Utility functions shared across layers.
//!
//! - [`id_generator`] - Short identifier generation
//! - [`db_error`] - Database error classification

pub mod db_error;
pub mod id_generator;
