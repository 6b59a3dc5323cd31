use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::compute_schedule;
use crate::annuity::{annual_pct, irr, monthly_rate};
use crate::types::*;
use crate::LoanEmiResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveRateOutput {
    pub effective_method: EffectiveMethod,
    /// Rate as quoted on the loan
    pub nominal_rate: Percent,
    /// Reducing-balance rate with the same EMI
    pub equivalent_reducing_rate: Percent,
    pub emi: Money,
}

/// Annual reducing-balance rate that reproduces the loan's EMI.
///
/// For a flat-rate loan this is the monthly IRR of
/// `[-principal, emi, ..., emi]` annualised (x 12). Reducing loans return
/// their own rate and interest-free loans return zero.
pub fn effective_reducing_rate(
    terms: &LoanTerms,
) -> LoanEmiResult<ComputationOutput<EffectiveRateOutput>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    let schedule = compute_schedule(terms)?;
    let emi = schedule[0].emi_amount;
    let effective_method = terms.effective_method();

    let equivalent_reducing_rate = match effective_method {
        EffectiveMethod::InterestFree => Decimal::ZERO,
        EffectiveMethod::Reducing => terms.annual_interest_rate,
        EffectiveMethod::Flat => {
            // Per unit of principal keeps the NPV tolerance scale-free
            let unit_emi = emi / terms.principal;
            let mut flows = Vec::with_capacity(schedule.len() + 1);
            flows.push(-Decimal::ONE);
            flows.extend(schedule.iter().map(|_| unit_emi));
            let monthly = irr(&flows, monthly_rate(terms.annual_interest_rate))?;
            annual_pct(monthly)
        }
    };

    let output = EffectiveRateOutput {
        effective_method,
        nominal_rate: terms.annual_interest_rate,
        equivalent_reducing_rate,
        emi,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Flat-to-Reducing Equivalent Rate (IRR)",
        &terms_assumptions(terms),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn terms(rate: Decimal, method: InterestMethod) -> LoanTerms {
        LoanTerms {
            principal: dec!(50000),
            tenure_months: 12,
            annual_interest_rate: rate,
            interest_method: method,
        }
    }

    #[test]
    fn test_flat_twelve_percent() {
        let out = effective_reducing_rate(&terms(dec!(12), InterestMethod::Flat)).unwrap();
        let rate = out.result.equivalent_reducing_rate;
        // Flat 12% over one year is roughly 21.5% on a reducing balance
        assert!(rate > dec!(21.3) && rate < dec!(21.6), "rate = {rate}");
    }

    #[test]
    fn test_reducing_returns_own_rate() {
        let out = effective_reducing_rate(&terms(dec!(9.5), InterestMethod::Reducing)).unwrap();
        assert_eq!(out.result.equivalent_reducing_rate, dec!(9.5));
    }

    #[test]
    fn test_interest_free_is_zero() {
        let out = effective_reducing_rate(&terms(Decimal::ZERO, InterestMethod::Flat)).unwrap();
        assert_eq!(out.result.equivalent_reducing_rate, Decimal::ZERO);
        assert_eq!(out.result.effective_method, EffectiveMethod::InterestFree);
    }

    #[test]
    fn test_high_rate_long_flat_loan() {
        let long = LoanTerms {
            principal: dec!(1000),
            tenure_months: 600,
            annual_interest_rate: dec!(500),
            interest_method: InterestMethod::Flat,
        };
        let out = effective_reducing_rate(&long).unwrap();
        let rate = out.result.equivalent_reducing_rate;
        // Close to a perpetuity: monthly IRR ~ EMI / principal = 0.41833
        assert!(rate > dec!(501) && rate < dec!(503), "rate = {rate}");
    }
}
