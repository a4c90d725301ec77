use crate::{ProrationError, Quarter, YearMonth};
use serde::{Deserialize, Serialize};

/// Two-tier maintenance rate, in currency per unit area per month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateSchedule {
    /// Rate billed for the annual deposit, before the changeover.
    pub old_rate: f64,
    /// Rate effective from the changeover month onwards.
    pub new_rate: f64,
}

impl Default for RateSchedule {
    fn default() -> Self {
        Self { old_rate: 5.00, new_rate: 3.95 }
    }
}

impl RateSchedule {
    /// Builds a schedule, rejecting non-positive or non-finite rates.
    pub fn new(old_rate: f64, new_rate: f64) -> Result<Self, ProrationError> {
        let schedule = Self { old_rate, new_rate };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Checks that both rates are positive and finite.
    ///
    /// A new rate above the old one is allowed.
    pub fn validate(&self) -> Result<(), ProrationError> {
        for (field, rate) in [("old_rate", self.old_rate), ("new_rate", self.new_rate)] {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(ProrationError::invalid(
                    field,
                    format!("rate must be a positive number, got {rate}"),
                ));
            }
        }
        Ok(())
    }

    /// Monthly charge for `area` at the old rate.
    pub fn old_monthly(&self, area: f64) -> f64 {
        area * self.old_rate
    }

    /// Monthly charge for `area` at the new rate.
    pub fn new_monthly(&self, area: f64) -> f64 {
        area * self.new_rate
    }
}

/// The three scalars a tenant supplies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// Apartment floor area in square feet.
    pub area: f64,
    /// Move-in month, `1..=12`.
    pub move_in_month: u32,
    /// Move-in year.
    pub move_in_year: i32,
}

impl CalculationInput {
    /// Convenience constructor; performs no validation.
    pub fn new(area: f64, move_in_month: u32, move_in_year: i32) -> Self {
        Self { area, move_in_month, move_in_year }
    }

    /// The move-in month as a [`YearMonth`], if the month number is valid.
    pub fn move_in(&self) -> Result<YearMonth, ProrationError> {
        YearMonth::new(self.move_in_year, self.move_in_month).map_err(|_| {
            ProrationError::invalid(
                "move_in_month",
                format!("expected a month between 1 and 12, got {}", self.move_in_month),
            )
        })
    }
}

/// Outcome of one proration. Amounts are unrounded; rounding is a display concern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProrationResult {
    /// Full annual deposit at the old rate.
    pub total_paid: f64,
    /// Months billed at the old rate before the changeover.
    pub used_months: u32,
    /// Portion of the deposit consumed by `used_months`.
    pub used_amount: f64,
    /// Deposit left after old-rate months, floored at zero.
    pub carried_forward: f64,
    /// Whole months from the changeover funded by `carried_forward` at the new rate.
    pub months_covered: u32,
    /// Residual balance after funding `months_covered`; less than one new-rate month.
    pub remaining_balance: f64,
    /// First month that requires a fresh cash payment.
    pub next_due: YearMonth,
    /// Billing quarter containing `next_due`.
    pub quarter: Quarter,
    /// Three months at the new rate.
    pub quarter_base: f64,
    /// `quarter_base` less the residual balance, floored at zero.
    pub quarter_payable: f64,
}

impl ProrationResult {
    /// Quarter label with the year of the next due month, e.g. `"Q1 (Jan–Mar) 2026"`.
    pub fn quarter_label(&self) -> String {
        format!("{} {}", self.quarter.label(), self.next_due.year())
    }
}
