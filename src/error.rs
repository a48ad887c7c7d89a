//! Error types for the calculation pipeline.
//!
//! Format and parse problems never become typed errors: the dispatcher
//! reports them as plain messages before any arithmetic is attempted.
//! Everything that can fail *inside* a calculation lands here.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    /// Unknown operation name, or a domain violation such as the square
    /// root of a negative number.
    #[error("{0}")]
    InvalidOperation(String),

    /// Zero divisor or zero root degree.
    #[error("{0}")]
    DivisionByZero(String),
}

impl CalcError {
    pub fn unknown_operation(name: &str, supported: &str) -> Self {
        Self::InvalidOperation(format!(
            "Unknown operation '{name}'. Supported: {supported}"
        ))
    }
}

pub type CalcResult<T> = Result<T, CalcError>;
