//! Installment-by-installment repayment schedules for employee loans.
//!
//! Three regimes are supported: interest-free (equal principal slices),
//! flat-rate (interest on the original principal spread evenly) and
//! reducing-balance (annuity EMI with interest on the outstanding balance).
//! All math in `rust_decimal::Decimal`; nothing is rounded until the final
//! balance is clamped to zero.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::annuity::{annuity_payment, monthly_rate};
use crate::error::LoanEmiError;
use crate::types::{EffectiveMethod, Installment, LoanTerms, Money, Rate};
use crate::LoanEmiResult;

/// Longest tenure accepted (100 years of monthly installments).
pub const MAX_TENURE_MONTHS: i32 = 1200;

const PCT_MONTHS: Decimal = dec!(1200);

/// Reject terms that cannot produce a schedule. Checked in field order:
/// tenure, principal, rate.
pub fn validate_terms(terms: &LoanTerms) -> LoanEmiResult<()> {
    if terms.tenure_months <= 0 || terms.tenure_months > MAX_TENURE_MONTHS {
        return Err(LoanEmiError::InvalidTenure(terms.tenure_months));
    }
    if terms.principal <= Decimal::ZERO {
        return Err(LoanEmiError::InvalidPrincipal(terms.principal));
    }
    if terms.annual_interest_rate < Decimal::ZERO {
        return Err(LoanEmiError::InvalidRate(terms.annual_interest_rate));
    }
    Ok(())
}

/// Compute the full repayment schedule for `terms`.
///
/// Returns exactly `tenure_months` installments numbered from 1, whose
/// principal components sum to the principal and whose last outstanding
/// balance is zero. A zero rate always yields the interest-free schedule,
/// whatever method was requested.
pub fn compute_schedule(terms: &LoanTerms) -> LoanEmiResult<Vec<Installment>> {
    validate_terms(terms)?;

    // validated to 1..=MAX_TENURE_MONTHS above
    let tenure = terms.tenure_months as u32;

    match terms.effective_method() {
        EffectiveMethod::InterestFree => {
            level_principal_schedule(terms.principal, tenure, Decimal::ZERO)
        }
        EffectiveMethod::Flat => {
            let total_interest = flat_total_interest(terms)?;
            let monthly_interest = total_interest / Decimal::from(tenure);
            level_principal_schedule(terms.principal, tenure, monthly_interest)
        }
        EffectiveMethod::Reducing => reducing_balance_schedule(
            terms.principal,
            tenure,
            monthly_rate(terms.annual_interest_rate),
        ),
    }
}

/// Total flat-rate interest: `principal * rate * tenure / 1200`.
pub fn flat_total_interest(terms: &LoanTerms) -> LoanEmiResult<Money> {
    terms
        .principal
        .checked_mul(terms.annual_interest_rate)
        .and_then(|v| v.checked_mul(Decimal::from(terms.tenure_months)))
        .map(|v| v / PCT_MONTHS)
        .ok_or_else(|| LoanEmiError::ComputationOverflow {
            context: "flat-rate total interest".into(),
        })
}

/// Equal principal slices with a constant interest charge per installment.
/// Covers both the interest-free and the flat-rate regimes.
fn level_principal_schedule(
    principal: Money,
    tenure: u32,
    monthly_interest: Money,
) -> LoanEmiResult<Vec<Installment>> {
    let monthly_principal = principal / Decimal::from(tenure);
    let emi = monthly_principal.checked_add(monthly_interest).ok_or_else(|| {
        LoanEmiError::ComputationOverflow {
            context: "flat-rate installment".into(),
        }
    })?;
    let mut balance = principal;

    let installments: Vec<Installment> = (1..=tenure)
        .map(|number| {
            balance = closing_balance(balance - monthly_principal, number == tenure);
            Installment {
                installment_number: number,
                emi_amount: emi,
                principal_component: monthly_principal,
                interest_component: monthly_interest,
                outstanding_balance: balance,
                due_date: None,
            }
        })
        .collect();
    Ok(installments)
}

/// Annuity schedule. Installment k repays `emi * (1+r)^-(n-k+1)` of
/// principal, which equals `emi - balance * r` but stays representable when
/// the early principal shares are below decimal resolution.
fn reducing_balance_schedule(
    principal: Money,
    tenure: u32,
    rate: Rate,
) -> LoanEmiResult<Vec<Installment>> {
    let emi = annuity_payment(rate, tenure, principal)?;
    let discount = Decimal::ONE / (Decimal::ONE + rate);
    // discount^1 ..= discount^tenure; below one, so the powers only shrink
    let powers: Vec<Decimal> = std::iter::successors(Some(discount), |p| Some(*p * discount))
        .take(tenure as usize)
        .collect();

    let mut balance = principal;
    let mut installments = Vec::with_capacity(tenure as usize);

    for number in 1..=tenure {
        let principal_component = emi * powers[(tenure - number) as usize];
        let interest = emi - principal_component;
        balance = closing_balance(balance - principal_component, number == tenure);

        installments.push(Installment {
            installment_number: number,
            emi_amount: emi,
            principal_component,
            interest_component: interest,
            outstanding_balance: balance,
            due_date: None,
        });
    }

    Ok(installments)
}

/// Floor at zero; the final installment absorbs any residual drift.
fn closing_balance(balance: Money, is_last: bool) -> Money {
    if is_last {
        Decimal::ZERO
    } else {
        balance.max(Decimal::ZERO)
    }
}
