//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see the store port, so
//! tests can substitute any `ComplaintStore`.

use std::sync::Arc;

use crate::domain::ports::ComplaintStore;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Store shared by every handler.
    pub store: Arc<dyn ComplaintStore>,
}

impl HttpState {
    /// Wrap a store for use by the handlers.
    pub fn new(store: Arc<dyn ComplaintStore>) -> Self {
        Self { store }
    }
}
