//! Shared application state.

use std::sync::Arc;

use hardrain_stanza::application::sequencer::Sequencer;

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The single sequencing engine behind every route.
    pub sequencer: Arc<Sequencer>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(sequencer: Arc<Sequencer>) -> Self {
        Self { sequencer }
    }
}
