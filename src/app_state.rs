//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::persistence::Store;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database access for every resource.
    pub store: Arc<Store>,
}

impl AppState {
    /// Wraps a connected store.
    #[must_use]
    pub const fn new(store: Arc<Store>) -> Self {
        Self { store }
    }
}
