//! Application state for the payroll API.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::service::PayrollService;
use crate::store::{InMemoryStore, PayrollStore};

/// Shared application state.
///
/// Holds the payroll service every handler calls into.
#[derive(Clone)]
pub struct AppState {
    service: PayrollService,
}

impl AppState {
    /// Creates state over an existing store.
    pub fn new(store: Arc<dyn PayrollStore>) -> Self {
        Self {
            service: PayrollService::new(store),
        }
    }

    /// Creates state over an in-memory store seeded from loaded configuration.
    pub fn from_config(config: &ConfigLoader) -> Self {
        Self::new(Arc::new(InMemoryStore::from_config(config)))
    }

    /// Returns the payroll service.
    pub fn service(&self) -> &PayrollService {
        &self.service
    }
}
