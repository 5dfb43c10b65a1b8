use thiserror::Error;

use crate::registry::ModeId;

/// Caller errors. Missing selections and lookup misses are not errors;
/// they surface as `Ok(None)` or as omitted/zero fields.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    #[error("unknown analysis mode: {0}")]
    UnknownMode(String),

    #[error("mode {mode} expects {expected} as input")]
    SourceMismatch { mode: ModeId, expected: &'static str },

    #[error("mode {mode} is malformed: {reason}")]
    InvalidDescriptor { mode: ModeId, reason: String },
}
