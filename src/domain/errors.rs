// ============================================================
// Layer 3 — Domain Errors
// ============================================================
// Every failure the conversion core can report.
//
// Scope of each error:
//   Configuration / Path   → abort the whole run before any dataset
//   MissingField / DuplicateUid / MalformedIdentifier /
//   DelimiterInField       → abort one dataset, the orchestrator
//                            decides whether the batch continues
//   UnsupportedFormat      → programmer error, fails immediately
//
// The application and CLI layers wrap these in anyhow::Error
// with extra context; everything below them returns PrepError.
//
// Reference: Rust Book §9 (Recoverable Errors with Result)
//            thiserror crate documentation

use std::{io, path::PathBuf};

use thiserror::Error;

/// Error type for configuration, validation, and I/O failures
/// raised while producing canonical and ground-truth files.
#[derive(Debug, Error)]
pub enum PrepError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("required path '{}' does not exist", .0.display())]
    Path(PathBuf),

    #[error("record '{uid}' is missing required field '{field}'")]
    MissingField { uid: String, field: String },

    #[error("unsupported data format '{0}'")]
    UnsupportedFormat(String),

    #[error("uid '{uid}' is not a valid ground-truth identifier")]
    MalformedIdentifier { uid: String },

    #[error("field '{field}' of record '{uid}' contains a delimiter character")]
    DelimiterInField { uid: String, field: String },

    #[error("dataset '{dataset}' contains duplicate uid '{uid}'")]
    DuplicateUid { dataset: String, uid: String },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Shorthand used by the data and domain layers.
pub type PrepResult<T> = Result<T, PrepError>;
