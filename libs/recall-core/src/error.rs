//! Error types for recall-core.

use thiserror::Error;

/// Result type alias using the crate error.
pub type Result<T> = std::result::Result<T, Error>;

/// Invalid-argument errors.
///
/// Every variant is a deterministic function of bad input; there are no
/// transient failures. All are reported before any observable mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid grade value {value}, expected 1-4")]
    InvalidGrade { value: u8 },

    #[error("reference and user answers must both be text or both be blank lists")]
    AnswerShapeMismatch,

    #[error("blank count mismatch: reference has {expected}, user answer has {actual}")]
    BlankCountMismatch { expected: usize, actual: usize },

    #[error("cloze answers must contain at least one blank")]
    EmptyCloze,
}
