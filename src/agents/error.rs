//! Error types for agent procedures

use thiserror::Error;

use crate::brain::BrainError;
use crate::storage::StoreError;

/// Errors that can occur while an agent runs
#[derive(Debug, Error)]
pub enum AgentError {
    /// Generation failed
    #[error(transparent)]
    Brain(#[from] BrainError),

    /// Reading or writing an artifact failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Prompt or report template failed to render
    #[error("Template error: {0}")]
    Template(String),
}

impl AgentError {
    /// True when the agent's input artifact does not exist yet
    pub fn is_missing_input(&self) -> bool {
        matches!(self, AgentError::Store(e) if e.is_not_found())
    }
}

impl From<tera::Error> for AgentError {
    fn from(err: tera::Error) -> Self {
        AgentError::Template(err.to_string())
    }
}

/// Result type alias for agent operations
pub type AgentResult<T> = Result<T, AgentError>;
