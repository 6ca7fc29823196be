//! Backend-agnostic access to the pre-generated question datasets.
//!
//! The ETL publishes one `companies-list.json` directory file plus one JSON
//! array per (company, period) under `companies/{slug}/`. `LocalFileStore`
//! reads that layout from disk; `RemoteHttpStore` reaches an equivalent
//! HTTP endpoint. Callers pick one through `store_from_config`.

mod local;
mod remote;

pub use local::LocalFileStore;
pub use remote::RemoteHttpStore;

use async_trait::async_trait;
use prepdeck_core::{Company, Period, PrepdeckError, Question, Result, StoreConfig};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Read-only contract over the question datasets.
///
/// Failure semantics are terminal per request: absent data is
/// `PrepdeckError::NotFound`, present-but-unparseable data is
/// `PrepdeckError::MalformedData`, and neither is retried.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// The full company directory, unfiltered and unpaginated.
    async fn list_companies(&self) -> Result<Vec<Company>>;

    /// Directory lookup by slug.
    async fn find_company(&self, slug: &str) -> Result<Option<Company>> {
        let companies = self.list_companies().await?;
        Ok(companies.into_iter().find(|c| c.slug == slug))
    }

    /// Questions for one (company, period) pair.
    async fn load_questions(&self, slug: &str, period: Period) -> Result<Vec<Question>>;

    /// Every period that loads cleanly for the company. Absent and malformed
    /// period files are skipped; `NotFound` only when nothing was found.
    async fn load_all_periods(&self, slug: &str) -> Result<HashMap<Period, Vec<Question>>>;
}

/// Builds the configured store backend.
pub fn store_from_config(config: &StoreConfig) -> Result<Arc<dyn QuestionStore>> {
    match config.backend.as_str() {
        "local" => {
            info!(data_dir = %config.data_dir.display(), "using local question store");
            Ok(Arc::new(LocalFileStore::new(config.data_dir.clone())))
        }
        "remote" => {
            info!(remote_url = %config.remote_url, "using remote question store");
            let store = RemoteHttpStore::new(config.remote_url.clone(), config.timeout_secs)?;
            Ok(Arc::new(store))
        }
        other => Err(PrepdeckError::Config(format!(
            "unknown store backend: {}",
            other
        ))),
    }
}

/// The two payload shapes a stored period file may carry. Current ETL output
/// is a bare array; an earlier revision wrapped it in `{"questions": [...]}`.
#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
pub(crate) enum PeriodPayload {
    Bare(Vec<Question>),
    Wrapped { questions: Vec<Question> },
}

impl PeriodPayload {
    pub(crate) fn into_questions(self) -> Vec<Question> {
        match self {
            PeriodPayload::Bare(questions) => questions,
            PeriodPayload::Wrapped { questions } => questions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_payload_bare_and_wrapped() {
        let bare = r#"[{"id":1,"title":"Two Sum","difficulty":"Easy","acceptanceRate":55.2,"frequency":80.1,"url":"u","tags":[],"isPremium":false}]"#;
        let payload: PeriodPayload = serde_json::from_str(bare).unwrap();
        assert_eq!(payload.into_questions().len(), 1);

        let wrapped = format!(r#"{{"questions":{}}}"#, bare);
        let payload: PeriodPayload = serde_json::from_str(&wrapped).unwrap();
        assert_eq!(payload.into_questions().len(), 1);
    }

    #[test]
    fn test_store_from_config_rejects_unknown_backend() {
        let mut config = StoreConfig::default();
        config.backend = "sqlite".to_string();
        assert!(matches!(
            store_from_config(&config),
            Err(PrepdeckError::Config(_))
        ));
    }
}
