pub mod amortization;
pub mod annuity;
pub mod calendar;
pub mod error;
pub mod rounding;
pub mod schedule;
pub mod summary;
pub mod types;

#[cfg(feature = "analysis")]
pub mod analysis;

pub use amortization::compute_schedule;
pub use error::LoanEmiError;
pub use schedule::{build_loan_schedule, LoanScheduleInput, LoanScheduleOutput};
pub use summary::summarize;
pub use types::*;

/// Standard result type for all loan-emi operations
pub type LoanEmiResult<T> = Result<T, LoanEmiError>;
