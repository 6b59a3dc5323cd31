use rust_decimal::Decimal;

use crate::error::LoanEmiError;
use crate::types::{Installment, Money, ScheduleSummary};
use crate::LoanEmiResult;

/// Reduce a schedule to its headline figures.
pub fn summarize(schedule: &[Installment], principal: Money) -> LoanEmiResult<ScheduleSummary> {
    let first = schedule.first().ok_or(LoanEmiError::EmptySchedule)?;
    let overflow = || LoanEmiError::ComputationOverflow {
        context: "schedule totals".into(),
    };
    let total_interest = schedule
        .iter()
        .try_fold(Decimal::ZERO, |acc, i| acc.checked_add(i.interest_component))
        .ok_or_else(overflow)?;

    Ok(ScheduleSummary {
        first_emi: first.emi_amount,
        total_interest,
        total_payable: principal.checked_add(total_interest).ok_or_else(overflow)?,
    })
}

/// Sum of the principal components; equals the principal for any computed
/// schedule, up to decimal drift.
pub fn total_principal(schedule: &[Installment]) -> Money {
    schedule
        .iter()
        .map(|i| i.principal_component)
        .fold(Decimal::ZERO, |acc, p| acc + p)
}
