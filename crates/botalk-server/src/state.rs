//! Application State

use std::sync::Arc;

use botalk_core::{FactBase, Orchestrator};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Answers chat messages (mode fixed at startup)
    pub orchestrator: Arc<Orchestrator>,

    /// Read-only company knowledge
    pub facts: Arc<FactBase>,
}

impl AppState {
    pub fn new(facts: Arc<FactBase>, orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            facts,
        }
    }
}
