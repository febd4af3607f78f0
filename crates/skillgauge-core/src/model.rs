//! Core data model types for skillgauge.
//!
//! These are the fundamental types the entire skillgauge system uses to
//! represent questions, score expectations, and user answers.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Separator used to build a group key from (section, sub_section).
///
/// Guaranteed not to appear in either field; the catalog/matrix loaders
/// reject records that contain it.
pub const GROUP_KEY_SEPARATOR: &str = "::";

/// Maximum ordinal score a single question can contribute.
pub const MAX_SCORE_PER_QUESTION: u32 = 3;

/// Build the group key for a (section, sub_section) pair.
pub fn group_key(section: &str, sub_section: &str) -> String {
    format!("{section}{GROUP_KEY_SEPARATOR}{sub_section}")
}

/// A single quiz item presented to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier for this question.
    pub id: String,
    /// Coarse grouping label.
    pub section: String,
    /// Fine-grained grouping label.
    pub sub_section: String,
    /// Question text shown to the user.
    pub question: String,
}

impl Question {
    /// Group key this question is scored under.
    pub fn group_key(&self) -> String {
        group_key(&self.section, &self.sub_section)
    }
}

/// An ordered question catalog.
///
/// Catalog order is significant: it defines presentation order and the
/// "last question" boundary of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    /// Unique identifier for this catalog.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of what this catalog assesses.
    #[serde(default)]
    pub description: String,
    /// The questions, in presentation order.
    pub questions: Vec<Question>,
}

/// Expectation record for one (section, sub_section) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreMatrixEntry {
    /// Unique identifier for this entry.
    pub id: String,
    /// Must match the section of at least one catalog question.
    pub section: String,
    /// Must match the sub_section of at least one catalog question.
    pub sub_section: String,
    /// Target score per experience bracket.
    pub expected: ExpectedScores,
}

impl ScoreMatrixEntry {
    /// Group key this entry provides targets for.
    pub fn group_key(&self) -> String {
        group_key(&self.section, &self.sub_section)
    }
}

/// Target scores for each experience bracket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectedScores {
    #[serde(rename = "0-3")]
    pub years_0_to_3: u32,
    #[serde(rename = "3-6")]
    pub years_3_to_6: u32,
    #[serde(rename = "6-9")]
    pub years_6_to_9: u32,
}

impl ExpectedScores {
    /// Target score for the given bracket.
    pub fn target(&self, bracket: ExperienceBracket) -> u32 {
        match bracket {
            ExperienceBracket::Years0To3 => self.years_0_to_3,
            ExperienceBracket::Years3To6 => self.years_3_to_6,
            ExperienceBracket::Years6To9 => self.years_6_to_9,
        }
    }
}

/// An ordered score matrix.
///
/// Matrix order drives breakdown display order, independent of the order
/// the scoring engine discovers groups in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreMatrix {
    /// Unique identifier for this matrix.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of this matrix.
    #[serde(default)]
    pub description: String,
    /// The expectation entries, in display order.
    pub entries: Vec<ScoreMatrixEntry>,
}

/// The three-point ordinal response scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    /// All levels, in ordinal order.
    pub const ALL: [SkillLevel; 3] = [
        SkillLevel::Beginner,
        SkillLevel::Intermediate,
        SkillLevel::Advanced,
    ];

    /// Ordinal score contributed by this level.
    pub fn score(self) -> u32 {
        match self {
            SkillLevel::Beginner => 1,
            SkillLevel::Intermediate => 2,
            SkillLevel::Advanced => 3,
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkillLevel::Beginner => write!(f, "Beginner"),
            SkillLevel::Intermediate => write!(f, "Intermediate"),
            SkillLevel::Advanced => write!(f, "Advanced"),
        }
    }
}

impl FromStr for SkillLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" | "1" => Ok(SkillLevel::Beginner),
            "intermediate" | "2" => Ok(SkillLevel::Intermediate),
            "advanced" | "3" => Ok(SkillLevel::Advanced),
            other => Err(format!("unknown skill level: {other}")),
        }
    }
}

/// Years-of-experience bracket used to pick an expected score target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperienceBracket {
    #[serde(rename = "0-3")]
    Years0To3,
    #[serde(rename = "3-6")]
    Years3To6,
    #[serde(rename = "6-9")]
    Years6To9,
}

impl ExperienceBracket {
    /// All brackets, lowest first.
    pub const ALL: [ExperienceBracket; 3] = [
        ExperienceBracket::Years0To3,
        ExperienceBracket::Years3To6,
        ExperienceBracket::Years6To9,
    ];

    /// The bracket used when the matrix lookup fallback needs a top target.
    pub const TOP: ExperienceBracket = ExperienceBracket::Years6To9;

    /// Next bracket, wrapping around. Used by the CLI to cycle brackets.
    pub fn next(self) -> ExperienceBracket {
        match self {
            ExperienceBracket::Years0To3 => ExperienceBracket::Years3To6,
            ExperienceBracket::Years3To6 => ExperienceBracket::Years6To9,
            ExperienceBracket::Years6To9 => ExperienceBracket::Years0To3,
        }
    }
}

impl Default for ExperienceBracket {
    fn default() -> Self {
        ExperienceBracket::Years0To3
    }
}

impl fmt::Display for ExperienceBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperienceBracket::Years0To3 => write!(f, "0-3"),
            ExperienceBracket::Years3To6 => write!(f, "3-6"),
            ExperienceBracket::Years6To9 => write!(f, "6-9"),
        }
    }
}

impl FromStr for ExperienceBracket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0-3" => Ok(ExperienceBracket::Years0To3),
            "3-6" => Ok(ExperienceBracket::Years3To6),
            "6-9" => Ok(ExperienceBracket::Years6To9),
            other => Err(format!("unknown experience bracket: {other}")),
        }
    }
}

/// User answers: question id -> chosen level. Absence means unanswered.
pub type AnswerMap = HashMap<String, SkillLevel>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skill_level_scores_are_ordinal() {
        assert_eq!(SkillLevel::Beginner.score(), 1);
        assert_eq!(SkillLevel::Intermediate.score(), 2);
        assert_eq!(SkillLevel::Advanced.score(), 3);
    }

    #[test]
    fn skill_level_display_and_parse() {
        assert_eq!(SkillLevel::Advanced.to_string(), "Advanced");
        assert_eq!("beginner".parse::<SkillLevel>().unwrap(), SkillLevel::Beginner);
        assert_eq!("2".parse::<SkillLevel>().unwrap(), SkillLevel::Intermediate);
        assert!("expert".parse::<SkillLevel>().is_err());
    }

    #[test]
    fn bracket_display_and_parse() {
        assert_eq!(ExperienceBracket::Years3To6.to_string(), "3-6");
        assert_eq!(
            "6-9".parse::<ExperienceBracket>().unwrap(),
            ExperienceBracket::Years6To9
        );
        assert!("9-12".parse::<ExperienceBracket>().is_err());
    }

    #[test]
    fn bracket_default_is_lowest() {
        assert_eq!(ExperienceBracket::default(), ExperienceBracket::Years0To3);
    }

    #[test]
    fn bracket_cycle_wraps() {
        assert_eq!(
            ExperienceBracket::Years6To9.next(),
            ExperienceBracket::Years0To3
        );
    }

    #[test]
    fn group_key_uses_separator() {
        let q = Question {
            id: "q1".into(),
            section: "Administration".into(),
            sub_section: "User Management".into(),
            question: "How confident are you?".into(),
        };
        assert_eq!(q.group_key(), "Administration::User Management");
    }

    #[test]
    fn expected_scores_target_by_bracket() {
        let expected = ExpectedScores {
            years_0_to_3: 4,
            years_3_to_6: 6,
            years_6_to_9: 8,
        };
        assert_eq!(expected.target(ExperienceBracket::Years0To3), 4);
        assert_eq!(expected.target(ExperienceBracket::TOP), 8);
    }

    #[test]
    fn expected_scores_serde_uses_bracket_names() {
        let expected = ExpectedScores {
            years_0_to_3: 4,
            years_3_to_6: 6,
            years_6_to_9: 8,
        };
        let json = serde_json::to_string(&expected).unwrap();
        assert!(json.contains("\"0-3\":4"));
        let back: ExpectedScores = serde_json::from_str(&json).unwrap();
        assert_eq!(back.years_6_to_9, 8);
    }
}
