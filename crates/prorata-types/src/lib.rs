//! Prorata Types
//!
//! This crate defines the data model shared by the prorata ecosystem
//! (`prorata-calculator` and `prorata-web`): calendar months, billing quarters,
//! the two-tier rate schedule, calculation inputs and results. Keeping them here
//! lets the web layer speak the same types as the calculator without depending
//! on its internals.

#![deny(warnings)]
#![deny(missing_docs)]

mod calendar;
mod error;
mod types;

pub use calendar::{Quarter, YearMonth, month_name};
pub use error::ProrationError;
pub use types::{CalculationInput, ProrationResult, RateSchedule};
