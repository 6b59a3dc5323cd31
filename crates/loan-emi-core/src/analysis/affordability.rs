use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{compute_schedule, MAX_TENURE_MONTHS};
use crate::annuity::{annuity_present_value, monthly_rate};
use crate::error::LoanEmiError;
use crate::summary::summarize;
use crate::types::*;
use crate::LoanEmiResult;

/// Installment ceiling to size a loan against (e.g. the share of net salary
/// payroll allows to be deducted)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityInput {
    pub max_emi: Money,
    pub tenure_months: i32,
    pub annual_interest_rate: Percent,
    #[serde(default)]
    pub interest_method: InterestMethod,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityOutput {
    pub max_principal: Money,
    /// Figures of the schedule for `max_principal`
    pub summary: ScheduleSummary,
}

/// Largest principal whose EMI stays within `max_emi`.
pub fn max_principal(
    input: &AffordabilityInput,
) -> LoanEmiResult<ComputationOutput<AffordabilityOutput>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    if input.tenure_months <= 0 || input.tenure_months > MAX_TENURE_MONTHS {
        return Err(LoanEmiError::InvalidTenure(input.tenure_months));
    }
    if input.max_emi <= Decimal::ZERO {
        return Err(LoanEmiError::InvalidInput {
            field: "max_emi".into(),
            reason: "Installment ceiling must be positive".into(),
        });
    }
    if input.annual_interest_rate < Decimal::ZERO {
        return Err(LoanEmiError::InvalidRate(input.annual_interest_rate));
    }

    let tenure = Decimal::from(input.tenure_months);
    let rate = input.annual_interest_rate;

    let overflow = || LoanEmiError::ComputationOverflow {
        context: "maximum principal".into(),
    };
    let principal = if rate.is_zero() {
        input.max_emi.checked_mul(tenure).ok_or_else(overflow)?
    } else {
        match input.interest_method {
            InterestMethod::Flat => {
                // EMI = P/n + P*r/1200, so P = EMI*n / (1 + r*n/1200)
                let repaid = input.max_emi.checked_mul(tenure).ok_or_else(overflow)?;
                let loading = rate.checked_mul(tenure).ok_or_else(overflow)? / dec!(1200);
                repaid
                    .checked_div(Decimal::ONE + loading)
                    .ok_or_else(overflow)?
            }
            InterestMethod::Reducing => annuity_present_value(
                monthly_rate(rate),
                input.tenure_months as u32,
                input.max_emi,
            )?,
        }
    };

    let terms = LoanTerms {
        principal,
        tenure_months: input.tenure_months,
        annual_interest_rate: rate,
        interest_method: input.interest_method,
    };
    let summary = summarize(&compute_schedule(&terms)?, principal)?;

    let output = AffordabilityOutput {
        max_principal: principal,
        summary,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Maximum Principal for EMI Ceiling",
        input,
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(rate: Decimal, method: InterestMethod) -> AffordabilityInput {
        AffordabilityInput {
            max_emi: dec!(1100),
            tenure_months: 10,
            annual_interest_rate: rate,
            interest_method: method,
        }
    }

    #[test]
    fn test_interest_free() {
        let out = max_principal(&input(Decimal::ZERO, InterestMethod::Flat)).unwrap();
        assert_eq!(out.result.max_principal, dec!(11000));
    }

    #[test]
    fn test_flat_inverts_schedule() {
        let out = max_principal(&input(dec!(12), InterestMethod::Flat)).unwrap();
        assert_eq!(out.result.max_principal, dec!(10000));
        assert_eq!(out.result.summary.first_emi, dec!(1100));
    }

    #[test]
    fn test_reducing_inverts_schedule() {
        let out = max_principal(&input(dec!(10), InterestMethod::Reducing)).unwrap();
        let emi = out.result.summary.first_emi;
        assert!((emi - dec!(1100)).abs() < dec!(0.000001), "emi = {emi}");
    }

    #[test]
    fn test_non_positive_ceiling() {
        let mut bad = input(dec!(10), InterestMethod::Reducing);
        bad.max_emi = Decimal::ZERO;
        assert!(matches!(
            max_principal(&bad),
            Err(LoanEmiError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_ceiling_too_large_for_decimal() {
        let mut huge = input(Decimal::ZERO, InterestMethod::Flat);
        huge.max_emi = Decimal::MAX;
        huge.tenure_months = 12;
        assert!(matches!(
            max_principal(&huge),
            Err(LoanEmiError::ComputationOverflow { .. })
        ));

        huge.annual_interest_rate = dec!(10);
        assert!(matches!(
            max_principal(&huge),
            Err(LoanEmiError::ComputationOverflow { .. })
        ));

        huge.interest_method = InterestMethod::Reducing;
        assert!(matches!(
            max_principal(&huge),
            Err(LoanEmiError::ComputationOverflow { .. })
        ));
    }

    #[test]
    fn test_high_rate_long_tenure() {
        let bounded = AffordabilityInput {
            max_emi: dec!(100),
            tenure_months: MAX_TENURE_MONTHS,
            annual_interest_rate: dec!(120),
            interest_method: InterestMethod::Reducing,
        };
        let out = max_principal(&bounded).unwrap();
        let principal = out.result.max_principal;
        assert!((principal - dec!(1000)).abs() < dec!(0.000001), "principal = {principal}");
    }
}
