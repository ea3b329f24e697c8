//! Pipeline error taxonomy.

use thiserror::Error;

/// Terminal pipeline errors. Every variant names enough context to point at
/// the offending request entry; kernel faults inside a feature are folded
/// into [`EngineError::Validation`] with the cause in `reason`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EngineError {
    #[error("feature '{feature_id}' ({feature_type}): {reason}")]
    Validation {
        feature_id: String,
        feature_type: String,
        reason: String,
    },

    #[error("unknown coordinate system '{name}'")]
    UnknownCsys { name: String },

    #[error("unknown setup '{id}'")]
    UnknownSetup { id: String },

    #[error("operation '{op}' is not supported")]
    UnsupportedOperation { op: String },

    #[error("operation '{op}': {reason}")]
    OperationFailed { op: String, reason: String },

    #[error("stock: {reason}")]
    Stock { reason: String },
}
