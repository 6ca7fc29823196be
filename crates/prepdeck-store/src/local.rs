use crate::{PeriodPayload, QuestionStore};
use async_trait::async_trait;
use prepdeck_core::{Company, Period, PrepdeckError, Question, Result};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

/// Question store over the ETL's published directory layout:
/// `{data_dir}/companies-list.json` plus
/// `{data_dir}/companies/{slug}/{period-file}`.
///
/// Files are immutable once published, so concurrent readers need no
/// coordination.
pub struct LocalFileStore {
    data_dir: PathBuf,
}

impl LocalFileStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Slugs are path components; anything outside the slug alphabet is
    /// treated as an unknown company rather than joined into a path.
    fn valid_slug(slug: &str) -> bool {
        !slug.is_empty()
            && slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.'))
            && slug != "."
            && slug != ".."
    }

    async fn read_file(&self, path: &PathBuf) -> Result<String> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(PrepdeckError::NotFound(format!(
                "no data file at {}",
                path.display()
            ))),
            Err(e) => Err(PrepdeckError::Io(e)),
        }
    }
}

#[async_trait]
impl QuestionStore for LocalFileStore {
    async fn list_companies(&self) -> Result<Vec<Company>> {
        let path = self.data_dir.join("companies-list.json");
        let content = self.read_file(&path).await?;
        serde_json::from_str(&content).map_err(|e| {
            PrepdeckError::MalformedData(format!("companies-list.json is not valid: {}", e))
        })
    }

    async fn load_questions(&self, slug: &str, period: Period) -> Result<Vec<Question>> {
        if !Self::valid_slug(slug) {
            return Err(PrepdeckError::NotFound(format!("no company: {}", slug)));
        }

        let path = self
            .data_dir
            .join("companies")
            .join(slug)
            .join(period.file_name());
        let content = self.read_file(&path).await?;
        let payload: PeriodPayload = serde_json::from_str(&content).map_err(|e| {
            PrepdeckError::MalformedData(format!("{} is not valid: {}", path.display(), e))
        })?;
        let questions = payload.into_questions();

        // Counts in the directory file are advisory and can drift behind the
        // period files; verify_counts logs the mismatch.
        if let Ok(Some(company)) = self.find_company(slug).await {
            company.verify_counts(period, questions.len());
        }

        Ok(questions)
    }

    async fn load_all_periods(&self, slug: &str) -> Result<HashMap<Period, Vec<Question>>> {
        let mut found = HashMap::new();
        for period in Period::ALL {
            match self.load_questions(slug, period).await {
                Ok(questions) => {
                    found.insert(period, questions);
                }
                Err(e) => {
                    debug!(slug, period = %period, error = %e, "skipping period");
                }
            }
        }

        if found.is_empty() {
            return Err(PrepdeckError::NotFound(format!(
                "no question files for company: {}",
                slug
            )));
        }
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn seed_company(dir: &Path, slug: &str, period: Period, questions: &str) {
        let company_dir = dir.join("companies").join(slug);
        std::fs::create_dir_all(&company_dir).unwrap();
        std::fs::write(company_dir.join(period.file_name()), questions).unwrap();
    }

    fn question_json(id: i64, title: &str) -> String {
        format!(
            r#"{{"id":{},"title":"{}","difficulty":"Easy","acceptanceRate":55.2,"frequency":80.1,"url":"https://leetcode.com/problems/two-sum","tags":[],"isPremium":false}}"#,
            id, title
        )
    }

    #[tokio::test]
    async fn test_load_questions_from_period_file() {
        let dir = tempfile::tempdir().unwrap();
        seed_company(
            dir.path(),
            "google",
            Period::All,
            &format!("[{}]", question_json(1, "Two Sum")),
        );

        let store = LocalFileStore::new(dir.path().to_path_buf());
        let questions = store.load_questions("google", Period::All).await.unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].title, "Two Sum");
    }

    #[tokio::test]
    async fn test_missing_company_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path().to_path_buf());
        let err = store
            .load_questions("doesnotexist", Period::All)
            .await
            .unwrap_err();
        assert!(matches!(err, PrepdeckError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_missing_period_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        seed_company(
            dir.path(),
            "google",
            Period::All,
            &format!("[{}]", question_json(1, "Two Sum")),
        );

        let store = LocalFileStore::new(dir.path().to_path_buf());
        let err = store
            .load_questions("google", Period::ThirtyDays)
            .await
            .unwrap_err();
        assert!(matches!(err, PrepdeckError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_invalid_json_is_malformed_data() {
        let dir = tempfile::tempdir().unwrap();
        seed_company(dir.path(), "google", Period::All, "{not json");

        let store = LocalFileStore::new(dir.path().to_path_buf());
        let err = store.load_questions("google", Period::All).await.unwrap_err();
        assert!(matches!(err, PrepdeckError::MalformedData(_)));
    }

    #[tokio::test]
    async fn test_legacy_wrapped_file_is_normalized() {
        let dir = tempfile::tempdir().unwrap();
        seed_company(
            dir.path(),
            "google",
            Period::All,
            &format!(r#"{{"questions":[{}]}}"#, question_json(1, "Two Sum")),
        );

        let store = LocalFileStore::new(dir.path().to_path_buf());
        let questions = store.load_questions("google", Period::All).await.unwrap();
        assert_eq!(questions.len(), 1);
    }

    #[tokio::test]
    async fn test_path_traversal_slug_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path().to_path_buf());
        for slug in ["../google", "a/b", "", "..", "Google"] {
            let err = store.load_questions(slug, Period::All).await.unwrap_err();
            assert!(matches!(err, PrepdeckError::NotFound(_)), "slug: {}", slug);
        }
    }

    #[tokio::test]
    async fn test_load_all_periods_skips_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        seed_company(
            dir.path(),
            "google",
            Period::All,
            &format!("[{}]", question_json(1, "Two Sum")),
        );
        seed_company(
            dir.path(),
            "google",
            Period::ThirtyDays,
            &format!("[{}]", question_json(2, "LRU Cache")),
        );
        seed_company(dir.path(), "google", Period::ThreeMonths, "{broken");

        let store = LocalFileStore::new(dir.path().to_path_buf());
        let periods = store.load_all_periods("google").await.unwrap();
        assert_eq!(periods.len(), 2);
        assert!(periods.contains_key(&Period::All));
        assert!(periods.contains_key(&Period::ThirtyDays));
        assert!(!periods.contains_key(&Period::ThreeMonths));
    }

    #[tokio::test]
    async fn test_load_all_periods_not_found_when_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path().to_path_buf());
        let err = store.load_all_periods("google").await.unwrap_err();
        assert!(matches!(err, PrepdeckError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_drifted_count_still_serves_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        seed_company(
            dir.path(),
            "google",
            Period::All,
            &format!("[{}]", question_json(1, "Two Sum")),
        );
        // Directory claims two questions, the period file holds one. The
        // regeneration jobs are separate and can drift; the file wins.
        std::fs::write(
            dir.path().join("companies-list.json"),
            r#"[{"id":"google","name":"Google","slug":"google","questionCounts":{"all":2},"availablePeriods":["all"]}]"#,
        )
        .unwrap();

        let store = LocalFileStore::new(dir.path().to_path_buf());
        let questions = store.load_questions("google", Period::All).await.unwrap();
        assert_eq!(questions.len(), 1);
    }

    #[tokio::test]
    async fn test_list_companies() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("companies-list.json"),
            r#"[{"id":"google","name":"Google","slug":"google","questionCounts":{"all":1},"availablePeriods":["all"]}]"#,
        )
        .unwrap();

        let store = LocalFileStore::new(dir.path().to_path_buf());
        let companies = store.list_companies().await.unwrap();
        assert_eq!(companies.len(), 1);
        assert_eq!(companies[0].slug, "google");

        let found = store.find_company("google").await.unwrap();
        assert!(found.is_some());
        let missing = store.find_company("meta").await.unwrap();
        assert!(missing.is_none());
    }
}
