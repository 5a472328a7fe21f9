//! Error taxonomy of the calibration engine.
//!
//! Every variant is recoverable: a rejected bid or a flagged project is
//! reported alongside the results computed from the rest of the batch.

use serde::Serialize;
use thiserror::Error;

/// Errors raised while deriving bid metrics or resolving project winners.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalibrationError {
    /// A price or rate that the derivation cannot work with.
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        /// Name of the offending input field.
        field: &'static str,
        /// Human-readable description including the offending value.
        reason: String,
    },

    /// More than one bid of a project carries the winner flag.
    #[error("project {project_id} has {count} bids flagged as winner")]
    MultipleWinners { project_id: String, count: usize },

    /// The single flagged winner was rejected by the deriver.
    #[error("winning bid of project {project_id} is unusable: {reason}")]
    UnusableWinner { project_id: String, reason: String },
}

impl CalibrationError {
    /// Creates an `InvalidInput` error.
    #[must_use]
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Short machine-friendly kind, used in exports and logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "invalid_input",
            Self::MultipleWinners { .. } => "multiple_winners",
            Self::UnusableWinner { .. } => "unusable_winner",
        }
    }
}

/// A string did not name any variant of a closed enumeration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    #[must_use]
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
