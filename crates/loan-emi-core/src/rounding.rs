use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::types::{Installment, Money, ScheduleSummary};

/// Rounding mode for displayed currency values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Half to even (banker's rounding)
    #[default]
    BankersRounding,
    /// Half away from zero
    HalfUp,
    /// Drop digits beyond the requested places
    Truncate,
}

impl RoundingMode {
    fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::BankersRounding => RoundingStrategy::MidpointNearestEven,
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::Truncate => RoundingStrategy::ToZero,
        }
    }
}

fn default_decimal_places() -> u32 {
    2
}

/// How monetary figures are rounded for presentation. Calculations never
/// round; this is applied to a finished schedule only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundingPolicy {
    #[serde(default)]
    pub mode: RoundingMode,
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
}

impl Default for RoundingPolicy {
    fn default() -> Self {
        Self {
            mode: RoundingMode::default(),
            decimal_places: default_decimal_places(),
        }
    }
}

impl RoundingPolicy {
    pub fn round(&self, value: Money) -> Money {
        value.round_dp_with_strategy(self.decimal_places, self.mode.strategy())
    }

    pub fn round_installment(&self, inst: &Installment) -> Installment {
        Installment {
            installment_number: inst.installment_number,
            emi_amount: self.round(inst.emi_amount),
            principal_component: self.round(inst.principal_component),
            interest_component: self.round(inst.interest_component),
            outstanding_balance: self.round(inst.outstanding_balance),
            due_date: inst.due_date,
        }
    }

    pub fn round_summary(&self, summary: &ScheduleSummary) -> ScheduleSummary {
        ScheduleSummary {
            first_emi: self.round(summary.first_emi),
            total_interest: self.round(summary.total_interest),
            total_payable: self.round(summary.total_payable),
        }
    }
}

/// Round every installment of a schedule for display.
pub fn round_schedule(schedule: &[Installment], policy: &RoundingPolicy) -> Vec<Installment> {
    schedule.iter().map(|i| policy.round_installment(i)).collect()
}

/// Whether `value` already has no more than `places` decimal digits.
pub fn is_rounded(value: Decimal, places: u32) -> bool {
    value.normalize().scale() <= places
}
