use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Periodic rates expressed as decimals (0.01 = 1% per month).
pub type Rate = Decimal;

/// Annual rates as entered on the loan form (12 = 12% p.a.).
pub type Percent = Decimal;

/// How interest is charged on a loan with a non-zero rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterestMethod {
    /// Interest on the original principal for the whole tenure, spread evenly
    Flat,
    /// Interest on the outstanding balance each month (annuity EMI)
    #[default]
    Reducing,
}

/// The branch actually used to build a schedule. A zero rate always wins
/// over the requested method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectiveMethod {
    InterestFree,
    Flat,
    Reducing,
}

/// Loan parameters for one calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    /// Signed so that negative form values are rejected as an invalid tenure
    pub tenure_months: i32,
    pub annual_interest_rate: Percent,
    #[serde(default)]
    pub interest_method: InterestMethod,
}

impl LoanTerms {
    pub fn effective_method(&self) -> EffectiveMethod {
        if self.annual_interest_rate.is_zero() {
            EffectiveMethod::InterestFree
        } else {
            match self.interest_method {
                InterestMethod::Flat => EffectiveMethod::Flat,
                InterestMethod::Reducing => EffectiveMethod::Reducing,
            }
        }
    }
}

/// A single installment of a repayment schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    pub installment_number: u32,
    pub emi_amount: Money,
    pub principal_component: Money,
    pub interest_component: Money,
    pub outstanding_balance: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

/// Aggregate figures derived from a schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub first_emi: Money,
    pub total_interest: Money,
    pub total_payable: Money,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

/// JSON snapshot of loan terms for the `assumptions` block
pub(crate) fn terms_assumptions(terms: &LoanTerms) -> serde_json::Value {
    serde_json::json!({
        "principal": terms.principal.to_string(),
        "tenure_months": terms.tenure_months,
        "annual_interest_rate": terms.annual_interest_rate.to_string(),
        "interest_method": terms.interest_method,
    })
}
