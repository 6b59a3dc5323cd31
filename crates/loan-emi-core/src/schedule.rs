use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::compute_schedule;
use crate::calendar::assign_due_dates;
use crate::rounding::{round_schedule, RoundingPolicy};
use crate::summary::{summarize, total_principal};
use crate::types::*;
use crate::LoanEmiResult;

/// Input for a full loan schedule preview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanScheduleInput {
    pub terms: LoanTerms,
    /// Due date of the first installment; later ones follow monthly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_due_date: Option<NaiveDate>,
    /// Display rounding applied after all figures are computed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rounding: Option<RoundingPolicy>,
}

impl From<LoanTerms> for LoanScheduleInput {
    fn from(terms: LoanTerms) -> Self {
        Self {
            terms,
            first_due_date: None,
            rounding: None,
        }
    }
}

/// Schedule plus its headline figures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanScheduleOutput {
    pub effective_method: EffectiveMethod,
    pub summary: ScheduleSummary,
    pub installments: Vec<Installment>,
}

/// Build the installment schedule and summary for a loan.
pub fn build_loan_schedule(
    input: &LoanScheduleInput,
) -> LoanEmiResult<ComputationOutput<LoanScheduleOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    let terms = &input.terms;

    let mut installments = compute_schedule(terms)?;
    let mut summary = summarize(&installments, terms.principal)?;
    let effective_method = terms.effective_method();

    if effective_method == EffectiveMethod::InterestFree {
        warnings.push(format!(
            "Interest method {:?} ignored for an interest-free loan",
            terms.interest_method
        ));
    }

    if let Some(first_due) = input.first_due_date {
        assign_due_dates(&mut installments, first_due)?;
    }

    if let Some(policy) = &input.rounding {
        let rounded = round_schedule(&installments, policy);
        let rounded_principal = total_principal(&rounded);
        if policy.round(rounded_principal) != policy.round(terms.principal) {
            warnings.push(format!(
                "Rounded principal components sum to {rounded_principal}, not {}",
                policy.round(terms.principal)
            ));
        }
        installments = rounded;
        summary = policy.round_summary(&summary);
    }

    let methodology = match effective_method {
        EffectiveMethod::InterestFree => "Loan EMI Schedule (interest-free)",
        EffectiveMethod::Flat => "Loan EMI Schedule (flat rate)",
        EffectiveMethod::Reducing => "Loan EMI Schedule (reducing balance)",
    };

    let output = LoanScheduleOutput {
        effective_method,
        summary,
        installments,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        methodology,
        &serde_json::json!({
            "terms": terms_assumptions(terms),
            "first_due_date": input.first_due_date,
            "rounding": input.rounding,
        }),
        warnings,
        elapsed,
        output,
    ))
}
