//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Structural and configuration failures of the core.
///
/// None of these are recoverable inside the domain: the core never guesses a
/// fallback value that would break the conservation laws. The caller adjusts
/// root data or parameters and retries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("column {field} outside (0, 1]: {value}")]
    ColumnOutOfRange { field: &'static str, value: f64 },

    #[error("invalid split parameters: {reason}")]
    InvalidParameters { reason: String },

    #[error("infeasible split: {side} break fraction z = {z} outside (0, 1)")]
    InfeasibleSplit { side: &'static str, z: f64 },
}

pub type DomainResult<T> = Result<T, DomainError>;
