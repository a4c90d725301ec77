//! Proration of an annual maintenance deposit across a rate changeover.
//!
//! The deposit is always one year at the old rate. Months between move-in and
//! the changeover are charged against it at the old rate (at most a year's
//! worth). What is left buys whole months at the new rate starting from the
//! changeover, and the fractional remainder is netted against the next
//! quarterly bill.

use chrono::Month;
use prorata_types::{CalculationInput, ProrationError, ProrationResult, RateSchedule, YearMonth};
use tracing::{debug, warn};

use crate::validation::InputBounds;

/// Length of the pre-paid billing cycle, in months.
pub(crate) const CYCLE_MONTHS: u32 = 12;

/// Months billed together in one quarter.
pub(crate) const QUARTER_MONTHS: u32 = 3;

/// Relative slack applied before flooring the months-covered ratio, so that a
/// balance which is an exact multiple of the monthly charge is not short one
/// month because of binary rounding.
const RATIO_TOLERANCE: f64 = 1e-9;

/// April 2025, the month the reduced rate took effect.
pub fn default_changeover() -> YearMonth {
    YearMonth::of(2025, Month::April)
}

/// Computes the proration schedule for one tenant.
///
/// Total for any `input` with `area > 0` and a month in `1..=12`; callers that
/// cannot guarantee this should go through [`ProrationCalculator::calculate`].
pub fn compute(
    input: &CalculationInput,
    rates: &RateSchedule,
    changeover: YearMonth,
) -> ProrationResult {
    debug_assert!((1..=12).contains(&input.move_in_month), "move-in month out of range");

    let old_monthly = rates.old_monthly(input.area);
    let new_monthly = rates.new_monthly(input.area);

    let total_paid = old_monthly * f64::from(CYCLE_MONTHS);
    let used_months = used_months(input, changeover);
    let used_amount = f64::from(used_months) * old_monthly;
    let carried_forward = (total_paid - used_amount).max(0.0);

    let (months_covered, remaining_balance) = fund_whole_months(carried_forward, new_monthly);

    let next_due = changeover.add_months(months_covered);
    let quarter = next_due.quarter();
    let quarter_base = new_monthly * f64::from(QUARTER_MONTHS);
    let quarter_payable = (quarter_base - remaining_balance).max(0.0);

    debug!(
        area = input.area,
        move_in_month = input.move_in_month,
        move_in_year = input.move_in_year,
        %changeover,
        used_months,
        months_covered,
        %next_due,
        quarter_payable,
        "Computed proration"
    );

    ProrationResult {
        total_paid,
        used_months,
        used_amount,
        carried_forward,
        months_covered,
        remaining_balance,
        next_due,
        quarter,
        quarter_base,
        quarter_payable,
    }
}

/// Months from move-in that fall strictly before the changeover, capped at one cycle.
///
/// Equivalent to walking forward a month at a time from move-in for at most
/// [`CYCLE_MONTHS`] steps and stopping at the first month not earlier than the
/// changeover.
fn used_months(input: &CalculationInput, changeover: YearMonth) -> u32 {
    let move_in = i64::from(input.move_in_year) * 12 + i64::from(input.move_in_month) - 1;
    let before_changeover = changeover.ordinal() - move_in;
    // clamped into 0..=12
    before_changeover.clamp(0, i64::from(CYCLE_MONTHS)) as u32
}

/// Spends `balance` on whole months costing `monthly` each.
///
/// Returns the month count and the residual, which is non-negative and below
/// one month's charge.
fn fund_whole_months(balance: f64, monthly: f64) -> (u32, f64) {
    if !(monthly.is_finite() && monthly > 0.0) {
        return (0, balance);
    }
    let ratio = balance / monthly;
    // f64 -> u32 saturates
    let months = (ratio * (1.0 + RATIO_TOLERANCE)).floor() as u32;
    let residual = (balance - f64::from(months) * monthly).max(0.0);
    (months, residual)
}

/// A configured calculator: rates, changeover month and accepted input bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProrationCalculator {
    rates: RateSchedule,
    changeover: YearMonth,
    bounds: InputBounds,
}

impl Default for ProrationCalculator {
    fn default() -> Self {
        Self {
            rates: RateSchedule::default(),
            changeover: default_changeover(),
            bounds: InputBounds::default(),
        }
    }
}

impl ProrationCalculator {
    /// Creates a calculator for a given schedule and changeover, with default bounds.
    pub fn new(rates: RateSchedule, changeover: YearMonth) -> Result<Self, ProrationError> {
        rates.validate()?;
        Ok(Self { rates, changeover, bounds: InputBounds::default() })
    }

    /// Replaces the accepted input bounds.
    pub fn with_bounds(mut self, bounds: InputBounds) -> Result<Self, ProrationError> {
        bounds.check()?;
        self.bounds = bounds;
        Ok(self)
    }

    /// Old and new rates this calculator bills with.
    pub fn rates(&self) -> &RateSchedule {
        &self.rates
    }

    /// Month the new rate takes effect.
    pub fn changeover(&self) -> YearMonth {
        self.changeover
    }

    /// Limits applied to input before computing.
    pub fn bounds(&self) -> &InputBounds {
        &self.bounds
    }

    /// Validates `input` and computes its proration.
    pub fn calculate(&self, input: &CalculationInput) -> Result<ProrationResult, ProrationError> {
        if let Err(err) = self.bounds.validate_with_rates(input, &self.rates) {
            warn!(field = err.field(), error = %err, "Rejected proration input");
            return Err(err);
        }
        Ok(compute(input, &self.rates, self.changeover))
    }
}
