use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use loan_emi_core::rounding::{RoundingMode, RoundingPolicy};
use loan_emi_core::schedule::{self, LoanScheduleInput};
use loan_emi_core::{InterestMethod, LoanTerms};

use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MethodArg {
    Flat,
    Reducing,
}

impl From<MethodArg> for InterestMethod {
    fn from(m: MethodArg) -> Self {
        match m {
            MethodArg::Flat => InterestMethod::Flat,
            MethodArg::Reducing => InterestMethod::Reducing,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoundingArg {
    Bankers,
    HalfUp,
    Truncate,
}

impl From<RoundingArg> for RoundingMode {
    fn from(r: RoundingArg) -> Self {
        match r {
            RoundingArg::Bankers => RoundingMode::BankersRounding,
            RoundingArg::HalfUp => RoundingMode::HalfUp,
            RoundingArg::Truncate => RoundingMode::Truncate,
        }
    }
}

/// Loan term flags shared by every loan command
#[derive(Args)]
pub struct TermsArgs {
    /// Loan principal
    #[arg(long, allow_hyphen_values = true)]
    pub principal: Option<Decimal>,

    /// Tenure in months
    #[arg(long, allow_hyphen_values = true)]
    pub tenure_months: Option<i32>,

    /// Annual interest rate in percent (e.g. 10.5)
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<Decimal>,

    /// Interest method (ignored for interest-free loans)
    #[arg(long, value_enum, default_value = "reducing")]
    pub method: MethodArg,
}

impl TermsArgs {
    pub fn to_terms(&self) -> Result<LoanTerms, Box<dyn std::error::Error>> {
        let principal = self
            .principal
            .ok_or("--principal is required (or provide --input)")?;
        let tenure_months = self
            .tenure_months
            .ok_or("--tenure-months is required (or provide --input)")?;

        Ok(LoanTerms {
            principal,
            tenure_months,
            annual_interest_rate: self.rate.unwrap_or(Decimal::ZERO),
            interest_method: self.method.into(),
        })
    }
}

/// Arguments for the installment schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub terms: TermsArgs,

    /// Due date of the first installment (YYYY-MM-DD)
    #[arg(long)]
    pub first_due_date: Option<NaiveDate>,

    /// Round displayed amounts to this many decimal places
    #[arg(long)]
    pub round: Option<u32>,

    /// Rounding mode used with --round
    #[arg(long, value_enum, default_value = "bankers")]
    pub rounding_mode: RoundingArg,
}

impl ScheduleArgs {
    fn to_input(&self) -> Result<LoanScheduleInput, Box<dyn std::error::Error>> {
        Ok(LoanScheduleInput {
            terms: self.terms.to_terms()?,
            first_due_date: self.first_due_date,
            rounding: self.round.map(|decimal_places| RoundingPolicy {
                mode: self.rounding_mode.into(),
                decimal_places,
            }),
        })
    }
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule_input = match input::load::<LoanScheduleInput>(args.input.as_deref())? {
        Some(loaded) => loaded,
        None => args.to_input()?,
    };

    let result = schedule::build_loan_schedule(&schedule_input)?;
    tracing::info!(
        installments = result.result.installments.len(),
        method = ?result.result.effective_method,
        "built loan schedule"
    );
    Ok(serde_json::to_value(result)?)
}
