use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_emi_core::analysis::affordability::{self, AffordabilityInput};
use loan_emi_core::analysis::comparison::{self, MethodComparisonInput};
use loan_emi_core::analysis::effective_rate;
use loan_emi_core::LoanTerms;

use super::schedule::{MethodArg, TermsArgs};
use crate::input;

/// Arguments for flat vs reducing comparison
#[derive(Args)]
pub struct CompareArgs {
    /// Path to JSON/YAML input file
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long, allow_hyphen_values = true)]
    pub principal: Option<Decimal>,

    /// Tenure in months
    #[arg(long, allow_hyphen_values = true)]
    pub tenure_months: Option<i32>,

    /// Annual interest rate in percent
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<Decimal>,
}

impl CompareArgs {
    /// A comparison needs an explicit rate; at zero both methods coincide.
    fn to_input(&self) -> Result<MethodComparisonInput, Box<dyn std::error::Error>> {
        Ok(MethodComparisonInput {
            principal: self
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            tenure_months: self
                .tenure_months
                .ok_or("--tenure-months is required (or provide --input)")?,
            annual_interest_rate: self.rate.ok_or("--rate is required (or provide --input)")?,
        })
    }
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cmp_input = match input::load::<MethodComparisonInput>(args.input.as_deref())? {
        Some(loaded) => loaded,
        None => args.to_input()?,
    };

    let result = comparison::compare_methods(&cmp_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for the flat-to-reducing equivalent rate
#[derive(Args)]
pub struct EffectiveRateArgs {
    /// Path to JSON/YAML input file
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub terms: TermsArgs,
}

pub fn run_effective_rate(args: EffectiveRateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = match input::load::<LoanTerms>(args.input.as_deref())? {
        Some(loaded) => loaded,
        None => args.terms.to_terms()?,
    };

    let result = effective_rate::effective_reducing_rate(&terms)?;
    tracing::info!(
        method = ?result.result.effective_method,
        rate = %result.result.equivalent_reducing_rate,
        "computed equivalent reducing rate"
    );
    Ok(serde_json::to_value(result)?)
}

/// Arguments for the maximum principal under an EMI ceiling
#[derive(Args)]
pub struct MaxPrincipalArgs {
    /// Path to JSON/YAML input file
    #[arg(long)]
    pub input: Option<String>,

    /// Largest affordable monthly installment
    #[arg(long, allow_hyphen_values = true)]
    pub max_emi: Option<Decimal>,

    /// Tenure in months
    #[arg(long, allow_hyphen_values = true)]
    pub tenure_months: Option<i32>,

    /// Annual interest rate in percent (omit for interest-free)
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<Decimal>,

    /// Interest method
    #[arg(long, value_enum, default_value = "reducing")]
    pub method: MethodArg,
}

impl MaxPrincipalArgs {
    fn to_input(&self) -> Result<AffordabilityInput, Box<dyn std::error::Error>> {
        Ok(AffordabilityInput {
            max_emi: self
                .max_emi
                .ok_or("--max-emi is required (or provide --input)")?,
            tenure_months: self
                .tenure_months
                .ok_or("--tenure-months is required (or provide --input)")?,
            annual_interest_rate: self.rate.unwrap_or(Decimal::ZERO),
            interest_method: self.method.into(),
        })
    }
}

pub fn run_max_principal(args: MaxPrincipalArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let afford_input = match input::load::<AffordabilityInput>(args.input.as_deref())? {
        Some(loaded) => loaded,
        None => args.to_input()?,
    };

    let result = affordability::max_principal(&afford_input)?;
    Ok(serde_json::to_value(result)?)
}
