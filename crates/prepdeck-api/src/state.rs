use prepdeck_ai::ComplexityAnalyzer;
use prepdeck_store::QuestionStore;
use std::sync::Arc;

/// Shared handler state. The analyzer is absent when no text-generation
/// provider is configured; the analysis endpoint then answers 503.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn QuestionStore>,
    pub analyzer: Option<Arc<ComplexityAnalyzer>>,
}

impl AppState {
    pub fn new(store: Arc<dyn QuestionStore>, analyzer: Option<Arc<ComplexityAnalyzer>>) -> Self {
        Self { store, analyzer }
    }
}
