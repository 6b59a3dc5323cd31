use loan_emi_core::amortization::MAX_TENURE_MONTHS;
use loan_emi_core::summary::total_principal;
use loan_emi_core::{compute_schedule, summarize, InterestMethod, LoanTerms};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Principal between 1.00 and 10,000,000.00
fn principal() -> impl Strategy<Value = Decimal> {
    (100i64..1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Annual rate between 0.01% and 36.00%
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..3600i64).prop_map(|bps| Decimal::new(bps, 2))
}

/// Annual rate between 0.01% and 500.00%
fn extreme_rate() -> impl Strategy<Value = Decimal> {
    (1i64..50_000i64).prop_map(|bps| Decimal::new(bps, 2))
}

fn method() -> impl Strategy<Value = InterestMethod> {
    prop_oneof![Just(InterestMethod::Flat), Just(InterestMethod::Reducing)]
}

fn loan(p: Decimal, n: i32, rate: Decimal, method: InterestMethod) -> LoanTerms {
    LoanTerms {
        principal: p,
        tenure_months: n,
        annual_interest_rate: rate,
        interest_method: method,
    }
}

proptest! {
    /// Property: principal components repay exactly the principal
    #[test]
    fn principal_components_sum_to_principal(
        p in principal(),
        n in 1i32..=360,
        rate in positive_rate(),
        m in method(),
    ) {
        let sched = compute_schedule(&loan(p, n, rate, m)).unwrap();
        let drift = (total_principal(&sched) - p).abs();
        prop_assert!(drift <= p * Decimal::new(1, 6), "drift {} on {}", drift, p);
    }

    /// Property: one installment per month and the loan ends fully repaid
    #[test]
    fn schedule_length_and_final_balance(
        p in principal(),
        n in 1i32..=360,
        rate in 0i64..3600i64,
        m in method(),
    ) {
        let sched = compute_schedule(&loan(p, n, Decimal::new(rate, 2), m)).unwrap();
        prop_assert_eq!(sched.len(), n as usize);
        prop_assert_eq!(sched.last().unwrap().outstanding_balance, Decimal::ZERO);
        for (i, inst) in sched.iter().enumerate() {
            prop_assert_eq!(inst.installment_number, i as u32 + 1);
            prop_assert!(inst.outstanding_balance >= Decimal::ZERO);
        }
    }

    /// Property: interest-free loans split the principal evenly
    #[test]
    fn interest_free_is_even_split(p in principal(), n in 1i32..=120, m in method()) {
        let sched = compute_schedule(&loan(p, n, Decimal::ZERO, m)).unwrap();
        let expected = p / Decimal::from(n);
        for inst in &sched {
            prop_assert_eq!(inst.interest_component, Decimal::ZERO);
            prop_assert_eq!(inst.emi_amount, expected);
        }
    }

    /// Property: flat EMIs are level and total interest is P * r * n / 1200
    #[test]
    fn flat_total_interest(p in principal(), n in 1i32..=120, rate in positive_rate()) {
        let sched = compute_schedule(&loan(p, n, rate, InterestMethod::Flat)).unwrap();
        let emi = sched[0].emi_amount;
        prop_assert!(sched.iter().all(|i| i.emi_amount == emi));

        let summary = summarize(&sched, p).unwrap();
        let expected = p * rate * Decimal::from(n) / Decimal::from(1200);
        prop_assert!((summary.total_interest - expected).abs() <= Decimal::new(1, 10));
    }

    /// Property: reducing-balance interest falls and principal rises each month
    #[test]
    fn reducing_components_are_monotonic(
        p in principal(),
        n in 2i32..=240,
        rate in positive_rate(),
    ) {
        let sched = compute_schedule(&loan(p, n, rate, InterestMethod::Reducing)).unwrap();
        let emi = sched[0].emi_amount;
        for pair in sched.windows(2) {
            prop_assert_eq!(pair[1].emi_amount, emi);
            prop_assert!(pair[1].interest_component < pair[0].interest_component);
            prop_assert!(pair[1].principal_component > pair[0].principal_component);
        }
    }

    /// Property: every accepted tenure and rate yields a full schedule ending at zero
    #[test]
    fn any_valid_terms_produce_a_schedule(
        p in principal(),
        n in 1i32..=MAX_TENURE_MONTHS,
        rate in extreme_rate(),
        m in method(),
    ) {
        let sched = compute_schedule(&loan(p, n, rate, m));
        prop_assert!(sched.is_ok(), "{:?}", sched.err());
        let sched = sched.unwrap();
        prop_assert_eq!(sched.len(), n as usize);
        prop_assert_eq!(sched.last().unwrap().outstanding_balance, Decimal::ZERO);
        prop_assert!(sched.iter().all(|i| i.outstanding_balance >= Decimal::ZERO));
        let drift = (total_principal(&sched) - p).abs();
        prop_assert!(drift <= p * Decimal::new(1, 6), "drift {} on {}", drift, p);
        prop_assert!(summarize(&sched, p).is_ok());
    }

    /// Property: non-positive tenure never yields a schedule
    #[test]
    fn non_positive_tenure_rejected(p in principal(), n in -1000i32..=0) {
        prop_assert!(compute_schedule(&loan(p, n, Decimal::ONE, InterestMethod::Flat)).is_err());
    }
}
