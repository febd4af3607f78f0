//! TOML catalog and score-matrix loading.
//!
//! Loads the two static data sources, enforces the load-time invariants
//! (schema, uniqueness, reserved separator), and provides the catalog/matrix
//! cross-check. All validation failures are fatal: no partial catalog or
//! matrix is ever returned.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::DataError;
use crate::model::{
    Catalog, ExpectedScores, Question, ScoreMatrix, ScoreMatrixEntry, GROUP_KEY_SEPARATOR,
};

/// Intermediate TOML structure for parsing catalog files.
#[derive(Debug, Deserialize)]
struct TomlCatalogFile {
    assessment: TomlHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

/// Intermediate TOML structure for parsing score-matrix files.
#[derive(Debug, Deserialize)]
struct TomlMatrixFile {
    matrix: TomlHeader,
    #[serde(default)]
    entries: Vec<TomlMatrixEntry>,
}

#[derive(Debug, Deserialize)]
struct TomlHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

// Record fields are Options so that missing-field errors can name the
// offending index and field instead of surfacing a serde parse error.
#[derive(Debug, Deserialize)]
struct TomlQuestion {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    section: Option<String>,
    #[serde(default)]
    sub_section: Option<String>,
    #[serde(default)]
    question: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlMatrixEntry {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    section: Option<String>,
    #[serde(default)]
    sub_section: Option<String>,
    #[serde(default)]
    expected: Option<TomlExpected>,
}

#[derive(Debug, Deserialize)]
struct TomlExpected {
    #[serde(rename = "0-3", default)]
    years_0_to_3: Option<i64>,
    #[serde(rename = "3-6", default)]
    years_3_to_6: Option<i64>,
    #[serde(rename = "6-9", default)]
    years_6_to_9: Option<i64>,
}

/// Load and validate a question catalog from a TOML file.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;
    parse_catalog_str(&content, path)
}

/// Parse a TOML string into a validated `Catalog` (useful for testing).
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<Catalog> {
    let parsed: TomlCatalogFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let mut questions = Vec::with_capacity(parsed.questions.len());
    for (index, q) in parsed.questions.into_iter().enumerate() {
        questions.push(Question {
            id: require_field(q.id, "question", index, "id")?,
            section: require_group_field(q.section, "question", index, "section")?,
            sub_section: require_group_field(q.sub_section, "question", index, "sub_section")?,
            question: require_field(q.question, "question", index, "question")?,
        });
    }

    check_unique_ids(questions.iter().map(|q| q.id.as_str()), "question")?;

    tracing::debug!(
        catalog = %parsed.assessment.id,
        questions = questions.len(),
        "catalog loaded"
    );

    Ok(Catalog {
        id: parsed.assessment.id,
        name: parsed.assessment.name,
        description: parsed.assessment.description,
        questions,
    })
}

/// Load and validate a score matrix from a TOML file.
pub fn load_matrix(path: &Path) -> Result<ScoreMatrix> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read score-matrix file: {}", path.display()))?;
    parse_matrix_str(&content, path)
}

/// Parse a TOML string into a validated `ScoreMatrix` (useful for testing).
pub fn parse_matrix_str(content: &str, source_path: &Path) -> Result<ScoreMatrix> {
    let parsed: TomlMatrixFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let mut entries = Vec::with_capacity(parsed.entries.len());
    for (index, e) in parsed.entries.into_iter().enumerate() {
        let expected = e.expected.ok_or(DataError::MissingField {
            source_kind: "matrix",
            index,
            field: "expected",
        })?;

        entries.push(ScoreMatrixEntry {
            id: require_field(e.id, "matrix", index, "id")?,
            section: require_group_field(e.section, "matrix", index, "section")?,
            sub_section: require_group_field(e.sub_section, "matrix", index, "sub_section")?,
            expected: ExpectedScores {
                years_0_to_3: require_target(expected.years_0_to_3, index, "0-3")?,
                years_3_to_6: require_target(expected.years_3_to_6, index, "3-6")?,
                years_6_to_9: require_target(expected.years_6_to_9, index, "6-9")?,
            },
        });
    }

    check_unique_ids(entries.iter().map(|e| e.id.as_str()), "matrix")?;

    tracing::debug!(
        matrix = %parsed.matrix.id,
        entries = entries.len(),
        "score matrix loaded"
    );

    Ok(ScoreMatrix {
        id: parsed.matrix.id,
        name: parsed.matrix.name,
        description: parsed.matrix.description,
        entries,
    })
}

fn require_field(
    value: Option<String>,
    source_kind: &'static str,
    index: usize,
    field: &'static str,
) -> Result<String, DataError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(DataError::MissingField {
            source_kind,
            index,
            field,
        }),
    }
}

fn require_group_field(
    value: Option<String>,
    source_kind: &'static str,
    index: usize,
    field: &'static str,
) -> Result<String, DataError> {
    let s = require_field(value, source_kind, index, field)?;
    if s.contains(GROUP_KEY_SEPARATOR) {
        return Err(DataError::ReservedSeparator {
            source_kind,
            index,
            field,
        });
    }
    Ok(s)
}

fn require_target(
    value: Option<i64>,
    index: usize,
    bracket: &'static str,
) -> Result<u32, DataError> {
    match value {
        Some(n) if n >= 0 => {
            u32::try_from(n).map_err(|_| DataError::TargetOutOfRange { index, bracket })
        }
        Some(_) => Err(DataError::NegativeTarget { index, bracket }),
        None => Err(DataError::MissingBracket { index, bracket }),
    }
}

fn check_unique_ids<'a>(
    ids: impl Iterator<Item = &'a str>,
    source_kind: &'static str,
) -> Result<(), DataError> {
    let mut seen = HashSet::new();
    for (index, id) in ids.enumerate() {
        if !seen.insert(id) {
            return Err(DataError::DuplicateId {
                source_kind,
                id: id.to_string(),
                index,
            });
        }
    }
    Ok(())
}

/// Result of the catalog/matrix cross-check.
///
/// `missing` lists question groups without a matrix entry; `unused` lists
/// matrix entries with no matching questions. Both lists are in first-
/// appearance order of their source.
#[derive(Debug, Clone, Default)]
pub struct CrossCheck {
    pub missing: Vec<String>,
    pub unused: Vec<String>,
}

impl CrossCheck {
    /// `true` when every question group has exactly one matrix entry and
    /// no matrix entry is orphaned.
    pub fn is_aligned(&self) -> bool {
        self.missing.is_empty() && self.unused.is_empty()
    }
}

/// Compare the group keys of a catalog and a matrix.
///
/// Run as a build-blocking gate by `skillgauge validate`; the session
/// runner also refuses misaligned data up front so the runtime fallback
/// in the breakdown builder stays unreachable in practice.
pub fn cross_validate(catalog: &Catalog, matrix: &ScoreMatrix) -> CrossCheck {
    let question_keys = unique_keys(catalog.questions.iter().map(Question::group_key));
    let matrix_keys = unique_keys(matrix.entries.iter().map(ScoreMatrixEntry::group_key));

    let matrix_set: HashSet<&str> = matrix_keys.iter().map(String::as_str).collect();
    let question_set: HashSet<&str> = question_keys.iter().map(String::as_str).collect();

    CrossCheck {
        missing: question_keys
            .iter()
            .filter(|k| !matrix_set.contains(k.as_str()))
            .cloned()
            .collect(),
        unused: matrix_keys
            .iter()
            .filter(|k| !question_set.contains(k.as_str()))
            .cloned()
            .collect(),
    }
}

fn unique_keys(keys: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    for key in keys {
        if seen.insert(key.clone()) {
            ordered.push(key);
        }
    }
    ordered
}
