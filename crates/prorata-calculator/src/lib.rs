#![deny(warnings)]
//! The proration calculator for apartment maintenance deposits.
//!
//! A tenant pre-pays a year of maintenance at the old per-area rate. When the
//! rate drops at the changeover month, the unused part of that deposit funds
//! whole months at the new rate, and whatever is left offsets the next
//! quarterly bill.
//!
//! [`compute`] is the pure, total calculation. [`ProrationCalculator`] wraps it
//! with a configured rate schedule, changeover and input bounds, and rejects
//! invalid input before anything is computed.

pub mod proration;
pub mod report;
pub mod validation;

pub use prorata_types::{
    CalculationInput, ProrationError, ProrationResult, Quarter, RateSchedule, YearMonth, month_name,
};
pub use proration::{ProrationCalculator, compute, default_changeover};
pub use report::{ProrationReport, format_currency};
pub use validation::InputBounds;
