use std::sync::Arc;

use crate::controller::Controller;
use crate::detection::{Analyzer, MockAnalyzer};

/// Shared application state: the page controller plus the detection service
/// the screens drive. Swapping `analyzer` for a real backend changes nothing
/// else.
pub struct AppState {
    pub controller: Controller,
    pub analyzer: Arc<dyn Analyzer>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            controller: Controller::new(),
            analyzer: Arc::new(MockAnalyzer::new()),
        }
    }
}
