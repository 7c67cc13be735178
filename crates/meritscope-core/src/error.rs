//! Scoring error types.
//!
//! The scoring engine performs no I/O, so the only failures it reports are
//! about the inputs it was handed: the student's numbers or the catalog rows.

use thiserror::Error;

/// Errors that can occur when computing an admission chance.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    /// A student input was missing, unparseable, or outside its domain.
    #[error("invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// A catalog program carries data the engine cannot score with.
    #[error("unusable catalog data for {institution}/{program}: {reason}")]
    InvalidCatalog {
        institution: String,
        program: String,
        reason: String,
    },

    /// No program with this composite key exists in the catalog.
    #[error("program not found: {institution}/{program}")]
    UnknownProgram {
        institution: String,
        program: String,
    },
}

impl ScoringError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ScoringError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Returns `true` if the caller supplied bad input and should keep its
    /// previous results instead of showing anything new.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ScoringError::InvalidInput { .. })
    }
}
