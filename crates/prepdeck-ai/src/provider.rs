use crate::gemini::{GeminiClient, GeminiConfig};
use anyhow::Result;
use async_trait::async_trait;
use prepdeck_core::{AnalysisConfig, PrepdeckError};
use std::sync::Arc;

/// A generative-text backend: prompt in, free text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends one prompt and awaits the complete reply. No retry, no
    /// streaming.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Get the name of this provider
    fn provider_name(&self) -> &str;

    /// Get the model identifier
    fn model_name(&self) -> &str;
}

/// Builds the configured text-generation provider.
pub fn provider_from_config(
    config: &AnalysisConfig,
) -> prepdeck_core::Result<Arc<dyn TextGenerator>> {
    match config.provider.as_str() {
        "gemini" => {
            let gemini_config = GeminiConfig {
                api_key: config
                    .api_key
                    .clone()
                    .or_else(|| std::env::var("GEMINI_API_KEY").ok())
                    .unwrap_or_default(),
                model: config.model.clone(),
                api_base: config.api_base.clone(),
                timeout_secs: config.timeout_secs,
            };
            let client = GeminiClient::new(gemini_config)
                .map_err(|e| PrepdeckError::Config(e.to_string()))?;
            Ok(Arc::new(client))
        }
        other => Err(PrepdeckError::Config(format!(
            "unknown analysis provider: {}",
            other
        ))),
    }
}
