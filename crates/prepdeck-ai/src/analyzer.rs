use crate::error::AnalysisError;
use crate::prompt::build_prompt;
use crate::provider::TextGenerator;
use crate::reply::parse_reply;
use prepdeck_cache::AnalysisCache;
use prepdeck_core::AnalysisResult;
use std::sync::Arc;
use tracing::{debug, warn};

/// The analysis pipeline: cache lookup, prompt construction, one backend
/// call, reply validation, cache write.
pub struct ComplexityAnalyzer {
    provider: Arc<dyn TextGenerator>,
    cache: Arc<AnalysisCache>,
}

impl ComplexityAnalyzer {
    pub fn new(provider: Arc<dyn TextGenerator>, cache: Arc<AnalysisCache>) -> Self {
        Self { provider, cache }
    }

    /// Derives the memoization key. The key is the exact bytes of language
    /// and code, deliberately unnormalized: a whitespace difference is a
    /// distinct entry.
    pub fn cache_key(code: &str, language: &str) -> String {
        format!("{}_time_complexity_{}", language, code)
    }

    /// Estimates the time complexity of `code`.
    ///
    /// `code` must be non-empty; the caller enforces that before invoking.
    /// `language` is a free-form label forwarded into the prompt. A cache hit
    /// returns without touching the backend; a miss issues exactly one call,
    /// never retried. Two concurrent misses on the same key both call the
    /// backend and both write, last write wins.
    pub async fn analyze(
        &self,
        code: &str,
        language: &str,
    ) -> Result<AnalysisResult, AnalysisError> {
        let key = Self::cache_key(code, language);

        if let Some(cached) = self.cache.get(&key) {
            debug!(language, "using cached time complexity result");
            return Ok(cached);
        }

        let prompt = build_prompt(code, language);
        let reply = self.provider.generate(&prompt).await.map_err(|e| {
            warn!(
                provider = self.provider.provider_name(),
                error = %e,
                "complexity analysis backend call failed"
            );
            AnalysisError::Backend(e)
        })?;

        let result = parse_reply(&reply)?;
        self.cache.insert(key, result.clone());
        Ok(result)
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    pub fn model_name(&self) -> &str {
        self.provider.model_name()
    }
}
