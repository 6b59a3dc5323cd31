use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanEmiError {
    #[error("Invalid principal: {0} (must be greater than zero)")]
    InvalidPrincipal(Decimal),

    #[error("Invalid tenure: {0} months (must be between 1 and 1200)")]
    InvalidTenure(i32),

    #[error("Invalid interest rate: {0}% (cannot be negative)")]
    InvalidRate(Decimal),

    #[error("Empty schedule: cannot summarise a schedule with no installments")]
    EmptySchedule,

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Convergence failure: {function} did not converge after {iterations} iterations (delta: {last_delta})")]
    ConvergenceFailure {
        function: String,
        iterations: u32,
        last_delta: Decimal,
    },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Arithmetic overflow in {context}")]
    ComputationOverflow { context: String },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for LoanEmiError {
    fn from(e: serde_json::Error) -> Self {
        LoanEmiError::SerializationError(e.to_string())
    }
}
