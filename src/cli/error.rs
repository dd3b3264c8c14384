//! CLI-level errors (top of the error chain)

use thiserror::Error;

use crate::domain::{DomainError, GeneratorError};
use crate::exitcode;
use crate::realize::RealizeError;
use crate::scenario::ScenarioError;

/// CLI errors are the top-level error type: what gets displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Scenario(#[from] ScenarioError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Generator(#[from] GeneratorError),

    #[error("{0}")]
    Realize(#[from] RealizeError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("check failed: {0}")]
    Check(String),
}

pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => exitcode::USAGE,
            CliError::Scenario(_) => exitcode::CONFIG,
            CliError::Domain(_)
            | CliError::Generator(_)
            | CliError::Realize(_)
            | CliError::Check(_) => exitcode::DATAERR,
        }
    }
}
