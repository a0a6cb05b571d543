//! Unit conversion errors

use thiserror::Error;

/// Errors raised by the unit table, exclusion policy, and converter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    /// The requested unit code is not registered in the table
    #[error("Unknown unit code: {0}")]
    UnknownUnit(String),

    /// The table or exclusion policy is malformed (startup defect)
    #[error("Unit table invariant violated: {0}")]
    InvariantViolation(String),
}

/// Result type for unit operations
pub type UnitResult<T> = Result<T, UnitError>;
