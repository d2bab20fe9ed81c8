//! Error types for runners and the registry
//!
//! Input problems are reported before generation starts: a runner's
//! `validate_input` returns [`InvalidInput`], and the erased entry points wrap
//! it in [`RunnerError`]. The only failure possible during generation itself is
//! hitting the configured step limit.

use thiserror::Error;

/// Human-readable reason an input was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvalidInput(pub String);

impl InvalidInput {
    pub fn new(reason: impl Into<String>) -> Self {
        InvalidInput(reason.into())
    }

    pub fn reason(&self) -> &str {
        &self.0
    }
}

/// Errors raised while validating input or generating a trace
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The JSON input could not be decoded into the runner's input type
    #[error("malformed input: {0}")]
    MalformedInput(#[from] serde_json::Error),

    /// The input decoded but failed validation
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    /// The trace grew past the configured limit
    #[error("step limit exceeded: trace reached {limit} steps")]
    StepLimitExceeded { limit: usize },
}

/// Registry lookup failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("no runner found for '{0}'")]
    NotFound(String),
}
