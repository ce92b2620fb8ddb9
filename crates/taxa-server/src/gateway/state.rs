use std::sync::Arc;

use taxa::{Categorizer, Embedder};

/// Shared per-request state for the gateway handlers.
pub struct HandlerState<E: Embedder + 'static> {
    pub categorizer: Arc<Categorizer<E>>,
}

impl<E: Embedder + 'static> HandlerState<E> {
    pub fn new(categorizer: Arc<Categorizer<E>>) -> Self {
        Self { categorizer }
    }
}

// Manual impl: `#[derive(Clone)]` would require `E: Clone`.
impl<E: Embedder + 'static> Clone for HandlerState<E> {
    fn clone(&self) -> Self {
        Self {
            categorizer: Arc::clone(&self.categorizer),
        }
    }
}
