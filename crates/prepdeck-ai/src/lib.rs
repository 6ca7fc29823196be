pub mod analyzer;
pub mod error;
pub mod gemini;
pub mod prompt;
pub mod provider;
pub mod reply;

pub use analyzer::ComplexityAnalyzer;
pub use error::AnalysisError;
pub use gemini::{GeminiClient, GeminiConfig};
pub use provider::{provider_from_config, TextGenerator};
