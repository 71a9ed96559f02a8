use std::{fmt, result::Result as StdResult};

use thiserror::Error;

/// Unified error type for the engine, services, storage and configuration.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = StdResult<T, PlanError>;

impl PlanError {
    pub fn validation(message: impl Into<String>) -> Self {
        PlanError::Validation(message.into())
    }

    pub fn not_found(entity: &'static str, id: impl fmt::Display) -> Self {
        PlanError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PlanError::NotFound { .. })
    }

    /// HTTP-equivalent status for callers that surface errors over a wire protocol.
    pub fn status_code(&self) -> u16 {
        match self {
            PlanError::Validation(_) => 400,
            PlanError::NotFound { .. } => 404,
            PlanError::Storage(_) | PlanError::Config(_) => 500,
        }
    }
}

impl From<std::io::Error> for PlanError {
    fn from(err: std::io::Error) -> Self {
        PlanError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for PlanError {
    fn from(err: serde_json::Error) -> Self {
        PlanError::Storage(err.to_string())
    }
}

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] PlanError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Core(PlanError::from(err))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Command(err.to_string())
    }
}
