//! Loan comparisons and what-if figures built on the schedule engine.

pub mod affordability;
pub mod comparison;
pub mod effective_rate;
