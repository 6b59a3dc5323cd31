use chrono::{Months, NaiveDate};

use crate::error::LoanEmiError;
use crate::types::Installment;
use crate::LoanEmiResult;

/// Due date of installment `number` (1-based) when the first one falls on
/// `first_due`. Month ends clamp, so Jan 31 is followed by Feb 28/29.
pub fn due_date(first_due: NaiveDate, number: u32) -> LoanEmiResult<NaiveDate> {
    let offset = number.saturating_sub(1);
    first_due
        .checked_add_months(Months::new(offset))
        .ok_or_else(|| {
            LoanEmiError::DateError(format!(
                "installment {number} falls outside the supported date range"
            ))
        })
}

/// Stamp each installment with its monthly due date.
pub fn assign_due_dates(
    installments: &mut [Installment],
    first_due: NaiveDate,
) -> LoanEmiResult<()> {
    for inst in installments.iter_mut() {
        inst.due_date = Some(due_date(first_due, inst.installment_number)?);
    }
    Ok(())
}
