use crate::{PeriodPayload, QuestionStore};
use async_trait::async_trait;
use prepdeck_core::{Company, Period, PrepdeckError, Question, Result};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Question store backed by another PrepDeck-compatible HTTP endpoint.
pub struct RemoteHttpStore {
    base_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct AllPeriodsPayload {
    questions: HashMap<Period, Vec<Question>>,
}

impl RemoteHttpStore {
    pub fn new(base_url: String, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| PrepdeckError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "remote store request");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PrepdeckError::UpstreamFailure(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(PrepdeckError::NotFound(format!("{} returned 404", url)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PrepdeckError::UpstreamFailure(format!(
                "{} returned {}: {}",
                url, status, body
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| PrepdeckError::UpstreamFailure(format!("reading {} failed: {}", url, e)))?;
        serde_json::from_str(&body)
            .map_err(|e| PrepdeckError::MalformedData(format!("{} payload is not valid: {}", url, e)))
    }
}

#[async_trait]
impl QuestionStore for RemoteHttpStore {
    async fn list_companies(&self) -> Result<Vec<Company>> {
        self.get_json("/api/companies-list").await
    }

    async fn load_questions(&self, slug: &str, period: Period) -> Result<Vec<Question>> {
        let path = format!("/api/company/{}/{}", slug, period.wire_name());
        let payload: PeriodPayload = self.get_json(&path).await?;
        Ok(payload.into_questions())
    }

    async fn load_all_periods(&self, slug: &str) -> Result<HashMap<Period, Vec<Question>>> {
        let path = format!("/api/company/{}", slug);
        let payload: AllPeriodsPayload = self.get_json(&path).await?;
        Ok(payload.questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let store = RemoteHttpStore::new("http://localhost:4000/".to_string(), 5).unwrap();
        assert_eq!(store.base_url, "http://localhost:4000");
    }

    #[test]
    fn test_all_periods_payload_shape() {
        let json = r#"{"questions":{"all":[],"thirtyDays":[]}}"#;
        let payload: AllPeriodsPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.questions.len(), 2);
        assert!(payload.questions.contains_key(&Period::All));
    }
}
