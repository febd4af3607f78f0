//! Per-group score aggregation.
//!
//! Pure functions from (catalog, answers) to totals. Recomputed on every
//! state change; no caching, no side effects, identical output for identical
//! input.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{AnswerMap, Question, MAX_SCORE_PER_QUESTION};

/// Aggregated score for one group or for the whole catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupScore {
    /// Sum of answered ordinal scores.
    pub total: u32,
    /// Maximum possible score: 3 per question, answered or not.
    pub max: u32,
}

/// Compute per-group totals keyed by group key.
///
/// Every catalog question raises its group's `max` by 3 regardless of
/// whether it was answered; `total` rises by the answer's ordinal score when
/// one exists. The catalog is the sole source of group existence: groups
/// with zero questions never appear.
pub fn section_totals(questions: &[Question], answers: &AnswerMap) -> HashMap<String, GroupScore> {
    let mut totals: HashMap<String, GroupScore> = HashMap::new();

    for question in questions {
        let entry = totals
            .entry(question.group_key())
            .or_insert(GroupScore { total: 0, max: 0 });
        entry.max += MAX_SCORE_PER_QUESTION;

        if let Some(level) = answers.get(&question.id) {
            entry.total += level.score();
        }
    }

    totals
}

/// Compute the overall total across the whole catalog.
pub fn overall_total(questions: &[Question], answers: &AnswerMap) -> GroupScore {
    let total = questions
        .iter()
        .filter_map(|q| answers.get(&q.id))
        .map(|level| level.score())
        .sum();

    GroupScore {
        total,
        max: questions.len() as u32 * MAX_SCORE_PER_QUESTION,
    }
}
