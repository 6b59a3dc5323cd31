use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::compute_schedule;
use crate::summary::summarize;
use crate::types::*;
use crate::LoanEmiResult;

/// Loan parameters to price under both interest methods
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodComparisonInput {
    pub principal: Money,
    pub tenure_months: i32,
    pub annual_interest_rate: Percent,
}

impl MethodComparisonInput {
    fn terms(&self, method: InterestMethod) -> LoanTerms {
        LoanTerms {
            principal: self.principal,
            tenure_months: self.tenure_months,
            annual_interest_rate: self.annual_interest_rate,
            interest_method: method,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodComparisonOutput {
    pub flat: ScheduleSummary,
    pub reducing: ScheduleSummary,
    /// Extra interest paid under the flat method
    pub interest_difference: Money,
    /// Extra monthly installment under the flat method
    pub emi_difference: Money,
}

/// Price the same loan under flat and reducing-balance interest.
pub fn compare_methods(
    input: &MethodComparisonInput,
) -> LoanEmiResult<ComputationOutput<MethodComparisonOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let flat_terms = input.terms(InterestMethod::Flat);
    let reducing_terms = input.terms(InterestMethod::Reducing);

    let flat = summarize(&compute_schedule(&flat_terms)?, input.principal)?;
    let reducing = summarize(&compute_schedule(&reducing_terms)?, input.principal)?;

    if input.annual_interest_rate.is_zero() {
        warnings.push("Interest-free loan: both methods produce the same schedule".into());
    }

    let output = MethodComparisonOutput {
        interest_difference: flat.total_interest - reducing.total_interest,
        emi_difference: flat.first_emi - reducing.first_emi,
        flat,
        reducing,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Flat vs Reducing Balance Comparison",
        input,
        warnings,
        elapsed,
        output,
    ))
}
