use thiserror::Error;

/// Fatal pipeline failures. Any of these means no answer set is produced.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("{resource} unavailable: {reason}")]
    ResourceUnavailable {
        resource: &'static str,
        reason: String,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to serialize output: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub fn unavailable(resource: &'static str, reason: impl ToString) -> Self {
        PipelineError::ResourceUnavailable {
            resource,
            reason: reason.to_string(),
        }
    }
}

/// A single token that could not be processed. The run skips it and continues.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenAnomaly {
    #[error("empty token")]
    Empty,
}

pub type Result<T, E = PipelineError> = std::result::Result<T, E>;
