use hostvitals_core::{Aggregator, FacetRegistry};
use std::sync::Arc;

/// Shared application state for handlers.
#[derive(Clone)]
pub struct AppState {
    /// Built once at startup, read-only afterwards.
    pub registry: Arc<FacetRegistry>,
    pub aggregator: Aggregator,
}

impl AppState {
    pub fn new(registry: FacetRegistry, aggregator: Aggregator) -> Self {
        Self {
            registry: Arc::new(registry),
            aggregator,
        }
    }
}
