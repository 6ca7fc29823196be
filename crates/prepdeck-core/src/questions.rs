//! Presentation helpers over loaded question lists.
//!
//! The HTTP layer always returns questions in stored order; these operations
//! are for callers that render the lists.

use crate::{Difficulty, Question};
use std::cmp::Ordering;

/// Field a question list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Title,
    Difficulty,
    Frequency,
    AcceptanceRate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Returns the questions matching the difficulty filter, `None` meaning all.
pub fn filter_by_difficulty(
    questions: &[Question],
    difficulty: Option<Difficulty>,
) -> Vec<Question> {
    questions
        .iter()
        .filter(|q| difficulty.map_or(true, |d| q.difficulty == d))
        .cloned()
        .collect()
}

/// Sorts questions in place. The sort is stable, so ties keep their original
/// insertion order. Frequency descending is the default initial view.
pub fn sort_questions(questions: &mut [Question], field: SortField, order: SortOrder) {
    questions.sort_by(|a, b| {
        let ordering = match field {
            SortField::Title => a.title.cmp(&b.title),
            SortField::Difficulty => a.difficulty.cmp(&b.difficulty),
            SortField::Frequency => compare_f64(a.frequency, b.frequency),
            SortField::AcceptanceRate => compare_f64(a.acceptance_rate, b.acceptance_rate),
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

fn compare_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
