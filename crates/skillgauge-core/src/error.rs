//! Load-time error types.
//!
//! These errors cover the two fatal data-loading classes: schema violations
//! and uniqueness violations. Defined in `skillgauge-core` as a typed enum so
//! the CLI can report the offending record without string matching. Runtime
//! scoring never produces errors; well-formed data is guaranteed by the load
//! gate and the `validate` cross-check.

use thiserror::Error;

/// Errors raised while loading a catalog or score matrix.
///
/// Any of these aborts the load entirely; no partial data is ever exposed.
#[derive(Debug, Error)]
pub enum DataError {
    /// A record is missing a required field or the field is empty.
    #[error("invalid {source_kind} record at index {index}: missing or empty field `{field}`")]
    MissingField {
        source_kind: &'static str,
        index: usize,
        field: &'static str,
    },

    /// A matrix record is missing the target for a required bracket.
    #[error("invalid matrix record at index {index}: missing expected score for bracket `{bracket}`")]
    MissingBracket { index: usize, bracket: &'static str },

    /// A matrix record carries a negative target score.
    #[error("invalid matrix record at index {index}: negative expected score for bracket `{bracket}`")]
    NegativeTarget { index: usize, bracket: &'static str },

    /// A matrix record carries a target score too large to represent.
    #[error("invalid matrix record at index {index}: expected score for bracket `{bracket}` is out of range")]
    TargetOutOfRange { index: usize, bracket: &'static str },

    /// Duplicate `id` within one source.
    #[error("duplicate {source_kind} id `{id}` at index {index}")]
    DuplicateId {
        source_kind: &'static str,
        id: String,
        index: usize,
    },

    /// A grouping field contains the reserved group-key separator.
    #[error("invalid {source_kind} record at index {index}: field `{field}` contains reserved separator `::`")]
    ReservedSeparator {
        source_kind: &'static str,
        index: usize,
        field: &'static str,
    },
}
