//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::RegistryService;
use crate::domain::repositories::LinkRepository;

/// Registry over whichever storage backend was configured at startup.
pub type Registry = RegistryService<dyn LinkRepository>;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
}

impl AppState {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }
}
