use napi::Result as NapiResult;
use napi_derive::napi;
use serde::de::DeserializeOwned;
use serde::Serialize;

use loan_emi_core::analysis::{affordability, comparison, effective_rate};
use loan_emi_core::{schedule, LoanEmiResult, LoanTerms};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Parse `input_json`, run `compute`, and serialise its output.
fn call_json<I, O>(
    input_json: &str,
    compute: impl FnOnce(&I) -> LoanEmiResult<O>,
) -> NapiResult<String>
where
    I: DeserializeOwned,
    O: Serialize,
{
    let input: I = serde_json::from_str(input_json).map_err(to_napi_error)?;
    let output = compute(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

#[napi]
pub fn build_loan_schedule(input_json: String) -> NapiResult<String> {
    call_json::<schedule::LoanScheduleInput, _>(&input_json, schedule::build_loan_schedule)
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

#[napi]
pub fn compare_methods(input_json: String) -> NapiResult<String> {
    call_json::<comparison::MethodComparisonInput, _>(&input_json, comparison::compare_methods)
}

#[napi]
pub fn effective_reducing_rate(input_json: String) -> NapiResult<String> {
    call_json::<LoanTerms, _>(&input_json, effective_rate::effective_reducing_rate)
}

#[napi]
pub fn max_principal(input_json: String) -> NapiResult<String> {
    call_json::<affordability::AffordabilityInput, _>(&input_json, affordability::max_principal)
}
