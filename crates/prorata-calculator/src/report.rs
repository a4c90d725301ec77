//! Display strings for a computed proration.
//!
//! Amounts are kept at full precision through the calculation and rounded to
//! two decimals only here.

use chrono::Month;
use prorata_types::{ProrationResult, RateSchedule, YearMonth};
use serde::Serialize;

/// Formats `amount` with a currency symbol, thousands separators and two decimals.
///
/// `format_currency("₹", 84600.0)` gives `"₹84,600.00"`.
pub fn format_currency(symbol: &str, amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{symbol}{grouped}.{cents}")
}

/// Everything the result panels show, already formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProrationReport {
    /// First month a cash payment is due, e.g. "March 2026".
    pub next_due: String,
    /// Quarter of the next due month with its year.
    pub quarter_label: String,
    /// Three months at the new rate.
    pub quarter_base: String,
    /// Residual balance netted against the quarter.
    pub remaining_balance: String,
    /// Amount owed for the quarter.
    pub quarter_payable: String,
    /// Annual deposit at the old rate.
    pub total_paid: String,
    /// Deposit consumed before the changeover.
    pub used_amount: String,
    /// Deposit left after old-rate months.
    pub carried_forward: String,
    /// Months billed at the old rate.
    pub used_months: u32,
    /// Months funded at the new rate.
    pub months_covered: u32,
    /// First month of the pre-paid cycle (January of the changeover year).
    pub cycle_start: String,
    /// Last month billed at the old rate.
    pub last_old_rate_month: String,
    /// Month the new rate takes effect.
    pub changeover: String,
    /// New per-area rate with currency symbol.
    pub new_rate: String,
}

impl ProrationReport {
    /// Formats `result` for display using `symbol` as the currency sign.
    pub fn new(
        result: &ProrationResult,
        rates: &RateSchedule,
        changeover: YearMonth,
        symbol: &str,
    ) -> Self {
        let money = |amount: f64| format_currency(symbol, amount);
        let cycle_start = YearMonth::of(changeover.year(), Month::January);

        Self {
            next_due: result.next_due.to_string(),
            quarter_label: result.quarter_label(),
            quarter_base: money(result.quarter_base),
            remaining_balance: money(result.remaining_balance),
            quarter_payable: money(result.quarter_payable),
            total_paid: money(result.total_paid),
            used_amount: money(result.used_amount),
            carried_forward: money(result.carried_forward),
            used_months: result.used_months,
            months_covered: result.months_covered,
            cycle_start: cycle_start.to_string(),
            last_old_rate_month: changeover.previous().to_string(),
            changeover: changeover.to_string(),
            new_rate: money(rates.new_rate),
        }
    }
}
