use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::LoanEmiError;
use crate::types::{Money, Percent, Rate};
use crate::LoanEmiResult;

/// Converts an annual percentage into a monthly decimal rate (12 -> 0.01).
const ANNUAL_PCT_TO_MONTHLY: Decimal = dec!(1200);

const CONVERGENCE_THRESHOLD: Decimal = dec!(0.0000001);
const MAX_IRR_ITERATIONS: u32 = 100;

/// Monthly decimal rate for an annual percentage rate.
pub fn monthly_rate(annual_pct: Percent) -> Rate {
    annual_pct / ANNUAL_PCT_TO_MONTHLY
}

/// Annual percentage rate for a monthly decimal rate.
pub fn annual_pct(monthly: Rate) -> Percent {
    monthly * ANNUAL_PCT_TO_MONTHLY
}

/// (1 + rate)^-nper. The base is below one for any positive rate, so the
/// power can only shrink toward zero and never overflows.
fn discount_factor(rate: Rate, nper: u32, context: &str) -> LoanEmiResult<Decimal> {
    let one_plus_r = Decimal::ONE + rate;
    if one_plus_r.is_zero() {
        return Err(LoanEmiError::DivisionByZero {
            context: context.to_string(),
        });
    }
    (Decimal::ONE / one_plus_r)
        .checked_powi(i64::from(nper))
        .ok_or_else(|| LoanEmiError::ComputationOverflow {
            context: context.to_string(),
        })
}

/// Level payment that fully amortises `principal` over `nper` periods.
///
/// `P * r / (1 - (1+r)^-n)`, or `P / n` at a zero rate. For long tenures at
/// high rates `(1+r)^-n` underflows to zero and the payment tends to `P * r`.
pub fn annuity_payment(rate: Rate, nper: u32, principal: Money) -> LoanEmiResult<Money> {
    if nper == 0 {
        return Err(LoanEmiError::InvalidInput {
            field: "nper".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if rate.is_zero() {
        return Ok(principal / Decimal::from(nper));
    }

    let discount = discount_factor(rate, nper, "annuity discount factor")?;
    let denominator = Decimal::ONE - discount;
    if denominator.is_zero() {
        return Err(LoanEmiError::DivisionByZero {
            context: "annuity payment denominator".into(),
        });
    }

    principal
        .checked_mul(rate)
        .and_then(|v| v.checked_div(denominator))
        .ok_or_else(|| LoanEmiError::ComputationOverflow {
            context: "annuity payment".into(),
        })
}

/// Present value of `nper` level payments, i.e. the principal they amortise.
///
/// `PMT * (1 - (1+r)^-n) / r`, or `PMT * n` at a zero rate.
pub fn annuity_present_value(rate: Rate, nper: u32, payment: Money) -> LoanEmiResult<Money> {
    if nper == 0 {
        return Err(LoanEmiError::InvalidInput {
            field: "nper".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if rate.is_zero() {
        return payment
            .checked_mul(Decimal::from(nper))
            .ok_or_else(|| LoanEmiError::ComputationOverflow {
                context: "present value of level payments".into(),
            });
    }

    let discount = discount_factor(rate, nper, "present value discount factor")?;
    let annuity_factor = (Decimal::ONE - discount) / rate;
    payment
        .checked_mul(annuity_factor)
        .ok_or_else(|| LoanEmiError::ComputationOverflow {
            context: "present value of level payments".into(),
        })
}

/// NPV of `cash_flows` at `rate` together with its derivative in `rate`.
///
/// Once the discount factor grows past the `Decimal` range the remaining
/// terms are below its resolution and the sum stops there. `None` when a
/// term itself overflows, which only happens for rates near -100%.
fn npv_with_derivative(rate: Rate, cash_flows: &[Money]) -> Option<(Decimal, Decimal)> {
    let one_plus_r = Decimal::ONE + rate;
    let mut npv_val = Decimal::ZERO;
    let mut dnpv = Decimal::ZERO;
    let mut discount = Decimal::ONE;

    for (t, cf) in cash_flows.iter().enumerate() {
        if discount.is_zero() {
            return None;
        }
        let Some(next) = discount.checked_mul(one_plus_r) else {
            break;
        };

        npv_val = npv_val.checked_add(cf.checked_div(discount)?)?;
        if t > 0 && !next.is_zero() {
            let slope = Decimal::from(t as u64).checked_mul(*cf)?.checked_div(next)?;
            dnpv = dnpv.checked_sub(slope)?;
        }
        discount = next;
    }

    Some((npv_val, dnpv))
}

/// Net Present Value of periodic cash flows, the first at t = 0.
pub fn npv(rate: Rate, cash_flows: &[Money]) -> LoanEmiResult<Money> {
    if rate <= dec!(-1) {
        return Err(LoanEmiError::InvalidInput {
            field: "rate".into(),
            reason: "Discount rate must be greater than -100%".into(),
        });
    }

    npv_with_derivative(rate, cash_flows)
        .map(|(value, _)| value)
        .ok_or_else(|| LoanEmiError::ComputationOverflow {
            context: "NPV discounting".into(),
        })
}

/// Periodic Internal Rate of Return using Newton-Raphson
pub fn irr(cash_flows: &[Money], guess: Rate) -> LoanEmiResult<Rate> {
    if cash_flows.len() < 2 {
        return Err(LoanEmiError::InvalidInput {
            field: "cash_flows".into(),
            reason: "IRR requires at least 2 cash flows".into(),
        });
    }

    let mut rate = guess;
    let mut last_delta = Decimal::MAX;

    for i in 0..MAX_IRR_ITERATIONS {
        let diverged = |last_delta| LoanEmiError::ConvergenceFailure {
            function: "IRR".into(),
            iterations: i,
            last_delta,
        };

        let (npv_val, dnpv) =
            npv_with_derivative(rate, cash_flows).ok_or_else(|| diverged(last_delta))?;
        last_delta = npv_val;

        if npv_val.abs() < CONVERGENCE_THRESHOLD {
            return Ok(rate);
        }

        rate = npv_val
            .checked_div(dnpv)
            .and_then(|step| rate.checked_sub(step))
            .ok_or_else(|| diverged(npv_val))?;

        // Guard against divergence
        if rate < dec!(-0.99) {
            rate = dec!(-0.99);
        } else if rate > dec!(10.0) {
            rate = dec!(10.0);
        }
    }

    Err(LoanEmiError::ConvergenceFailure {
        function: "IRR".into(),
        iterations: MAX_IRR_ITERATIONS,
        last_delta,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_rate() {
        assert_eq!(monthly_rate(dec!(12)), dec!(0.01));
        assert_eq!(annual_pct(dec!(0.01)), dec!(12));
    }

    #[test]
    fn test_annuity_payment_known_answer() {
        // 100,000 at 10% p.a. over 12 months => ~8,791.59
        let emi = annuity_payment(monthly_rate(dec!(10)), 12, dec!(100000)).unwrap();
        assert!((emi - dec!(8791.59)).abs() < dec!(0.01), "emi = {emi}");
    }

    #[test]
    fn test_annuity_payment_zero_rate() {
        let emi = annuity_payment(Decimal::ZERO, 4, dec!(1000)).unwrap();
        assert_eq!(emi, dec!(250));
    }

    #[test]
    fn test_annuity_payment_zero_periods() {
        assert!(annuity_payment(dec!(0.01), 0, dec!(1000)).is_err());
    }

    #[test]
    fn test_present_value_inverts_payment() {
        let rate = monthly_rate(dec!(9));
        let emi = annuity_payment(rate, 36, dec!(250000)).unwrap();
        let pv = annuity_present_value(rate, 36, emi).unwrap();
        assert!((pv - dec!(250000)).abs() < dec!(0.000001), "pv = {pv}");
    }

    #[test]
    fn test_irr_recovers_annuity_rate() {
        let rate = dec!(0.01);
        let emi = annuity_payment(rate, 24, dec!(10000)).unwrap();
        let mut flows = vec![dec!(-10000)];
        flows.extend(std::iter::repeat(emi).take(24));
        let result = irr(&flows, dec!(0.005)).unwrap();
        assert!((result - rate).abs() < dec!(0.000001), "irr = {result}");
    }

    #[test]
    fn test_irr_needs_two_flows() {
        assert!(irr(&[dec!(-100)], dec!(0.1)).is_err());
    }

    #[test]
    fn test_npv_zero_rate() {
        let cfs = vec![dec!(-100), dec!(50), dec!(50), dec!(50)];
        let result = npv(dec!(0.0), &cfs).unwrap();
        assert_eq!(result, dec!(50));
    }

    #[test]
    fn test_payment_tends_to_interest_only_at_high_rate() {
        // 120% p.a. over 100 years: (1+r)^n is far beyond Decimal range
        let rate = monthly_rate(dec!(120));
        let emi = annuity_payment(rate, 1200, dec!(1000)).unwrap();
        assert!((emi - dec!(100)).abs() < dec!(0.0000001), "emi = {emi}");
    }

    #[test]
    fn test_present_value_at_high_rate() {
        let rate = monthly_rate(dec!(120));
        let pv = annuity_present_value(rate, 1200, dec!(100)).unwrap();
        assert!((pv - dec!(1000)).abs() < dec!(0.0000001), "pv = {pv}");
    }

    #[test]
    fn test_present_value_overflow_is_an_error() {
        let err = annuity_present_value(Decimal::ZERO, 12, Decimal::MAX);
        assert!(matches!(err, Err(LoanEmiError::ComputationOverflow { .. })));
        let err = annuity_present_value(dec!(0.01), 12, Decimal::MAX);
        assert!(matches!(err, Err(LoanEmiError::ComputationOverflow { .. })));
    }

    #[test]
    fn test_irr_long_high_rate_flows() {
        // 600 payments at ~42% a month push the discount factor past Decimal::MAX
        let rate = dec!(0.42);
        let emi = annuity_payment(rate, 600, Decimal::ONE).unwrap();
        let mut flows = vec![-Decimal::ONE];
        flows.extend(std::iter::repeat(emi).take(600));
        let result = irr(&flows, dec!(0.4)).unwrap();
        assert!((result - rate).abs() < dec!(0.000001), "irr = {result}");
    }

    #[test]
    fn test_npv_stops_at_decimal_range() {
        let flows = vec![dec!(1); 400];
        let result = npv(dec!(1), &flows).unwrap();
        // Geometric series 1 + 1/2 + 1/4 + ...
        assert!((result - dec!(2)).abs() < dec!(0.0000001), "npv = {result}");
    }
}
