use std::sync::Arc;

use crate::knowledge::KnowledgeBase;

/// Shared application state injected into the tool server handlers.
#[derive(Clone)]
pub struct AppState {
    /// Loaded once at startup and never mutated.
    pub knowledge: Arc<KnowledgeBase>,
}
