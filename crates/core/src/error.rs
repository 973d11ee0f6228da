//! Failure values surfaced by the analysis pipeline.
//!
//! Every way an analysis can go wrong ends up as an [`AnalysisFailure`]:
//! a [`FailureKind`] tag plus a message meant for the user. Failures are
//! terminal values; nothing in the pipeline retries them.

use serde::Serialize;
use std::fmt;
use std::time::Duration;

use crate::llm::LlmError;

/// Classification of an analysis failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Empty or whitespace-only name, rejected before dispatch.
    InputRejected,
    /// The inference engine could not be reached, refused the credentials,
    /// or answered with a non-success status.
    EngineUnavailable,
    /// The engine answered, but with values outside the accepted schema.
    SchemaValidationError,
    /// The caller-supplied timeout expired before the engine answered.
    Timeout,
    /// Anything not classified above.
    Unexpected,
}

impl FailureKind {
    /// Stable, human-oriented label for the kind.
    pub fn label(&self) -> &'static str {
        match self {
            FailureKind::InputRejected => "Input rejected",
            FailureKind::EngineUnavailable => "Engine unavailable",
            FailureKind::SchemaValidationError => "Schema validation error",
            FailureKind::Timeout => "Timeout",
            FailureKind::Unexpected => "Unexpected error",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A terminal analysis failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct AnalysisFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl AnalysisFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn input_rejected(message: impl Into<String>) -> Self {
        Self::new(FailureKind::InputRejected, message)
    }

    pub fn engine_unavailable(message: impl Into<String>) -> Self {
        Self::new(FailureKind::EngineUnavailable, message)
    }

    pub fn schema(message: impl Into<String>) -> Self {
        Self::new(FailureKind::SchemaValidationError, message)
    }

    pub fn timeout(after: Duration) -> Self {
        Self::new(
            FailureKind::Timeout,
            format!("no answer from the inference engine after {:?}", after),
        )
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Unexpected, message)
    }
}

impl From<LlmError> for AnalysisFailure {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Http(msg) => AnalysisFailure::engine_unavailable(msg),
            LlmError::Api { status, message } => match status {
                401 | 403 => AnalysisFailure::engine_unavailable(format!(
                    "authentication rejected ({}): {}",
                    status, message
                )),
                _ => AnalysisFailure::engine_unavailable(format!("HTTP {}: {}", status, message)),
            },
            LlmError::Json(msg) => {
                AnalysisFailure::schema(format!("unreadable engine response: {}", msg))
            }
        }
    }
}
