use crate::{PrepdeckError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Question difficulty as recorded by the ETL exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

/// A single interview question. Immutable once loaded; the ETL owns these
/// records and the service never mutates them at request time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    pub title: String,
    pub difficulty: Difficulty,
    pub acceptance_rate: f64,
    pub frequency: f64,
    pub url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_premium: bool,
}

/// A named recency bucket for interview questions.
///
/// The set is closed: unrecognized period strings are a typed parse error,
/// never a filename guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Period {
    All,
    MoreThanSixMonths,
    UnderSixMonths,
    ThreeMonths,
    ThirtyDays,
}

impl Period {
    /// Canonical ETL ordering, used for aggregate iteration.
    pub const ALL: [Period; 5] = [
        Period::All,
        Period::MoreThanSixMonths,
        Period::UnderSixMonths,
        Period::ThreeMonths,
        Period::ThirtyDays,
    ];

    /// The name the period carries in URLs and JSON payloads.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Period::All => "all",
            Period::MoreThanSixMonths => "moreThanSixMonths",
            Period::UnderSixMonths => "underSixMonths",
            Period::ThreeMonths => "threeMonths",
            Period::ThirtyDays => "thirtyDays",
        }
    }

    /// The file the ETL writes for this period inside a company directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Period::All => "all.json",
            Period::MoreThanSixMonths => "more-than-six-months.json",
            Period::UnderSixMonths => "six-months.json",
            Period::ThreeMonths => "three-months.json",
            Period::ThirtyDays => "thirty-days.json",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

impl FromStr for Period {
    type Err = PrepdeckError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(Period::All),
            "moreThanSixMonths" => Ok(Period::MoreThanSixMonths),
            "underSixMonths" => Ok(Period::UnderSixMonths),
            "threeMonths" => Ok(Period::ThreeMonths),
            "thirtyDays" => Ok(Period::ThirtyDays),
            other => Err(PrepdeckError::InvalidOperation(format!(
                "Unrecognized period: {}",
                other
            ))),
        }
    }
}

/// Company directory entry from `companies-list.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default)]
    pub question_counts: HashMap<Period, u64>,
    #[serde(default)]
    pub available_periods: Vec<Period>,
}

impl Company {
    /// Checks the recorded count for a period against the number of questions
    /// actually loaded. The directory and the period files are regenerated by
    /// separate batch jobs and can drift; a mismatch is logged and tolerated,
    /// the counts are advisory.
    pub fn verify_counts(&self, period: Period, loaded: usize) -> bool {
        match self.question_counts.get(&period) {
            Some(&expected) if expected as usize != loaded => {
                warn!(
                    slug = %self.slug,
                    period = %period,
                    expected,
                    loaded,
                    "question count in companies-list.json does not match period file"
                );
                false
            }
            Some(_) => true,
            None => true,
        }
    }
}

/// A company together with every period's question list found for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyQuestions {
    pub company: Company,
    pub questions: HashMap<Period, Vec<Question>>,
}

/// One point of the sample growth curve illustrating an estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphPoint {
    pub n: i64,
    pub ops: f64,
}

/// Structured complexity estimate produced by the analysis pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub complexity: String,
    pub graph_data: Vec<GraphPoint>,
    pub explanation: String,
}
