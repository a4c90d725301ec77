//! Input bounds checked before a proration runs.
//!
//! `area > 0` and a month in `1..=12` are always enforced. Year and area
//! limits are configurable so a form can narrow them further.

use prorata_types::{CalculationInput, ProrationError, RateSchedule, YearMonth};
use serde::{Deserialize, Serialize};

use crate::proration::{CYCLE_MONTHS, QUARTER_MONTHS};

/// Accepted ranges for move-in year and area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputBounds {
    /// Earliest accepted move-in year.
    pub min_year: i32,
    /// Latest accepted move-in year.
    pub max_year: i32,
    /// Smallest accepted area, if limited.
    pub min_area: Option<f64>,
    /// Largest accepted area, if limited.
    pub max_area: Option<f64>,
}

impl Default for InputBounds {
    fn default() -> Self {
        Self { min_year: 2020, max_year: 2030, min_area: None, max_area: None }
    }
}

impl InputBounds {
    /// Validates `input` and returns its move-in month.
    pub fn validate(&self, input: &CalculationInput) -> Result<YearMonth, ProrationError> {
        let area = input.area;
        if !area.is_finite() || area <= 0.0 {
            return Err(ProrationError::invalid(
                "area",
                format!("area must be a positive number, got {area}"),
            ));
        }
        if let Some(min) = self.min_area {
            if area < min {
                return Err(ProrationError::invalid(
                    "area",
                    format!("area {area} is below the minimum of {min}"),
                ));
            }
        }
        if let Some(max) = self.max_area {
            if area > max {
                return Err(ProrationError::invalid(
                    "area",
                    format!("area {area} exceeds the maximum of {max}"),
                ));
            }
        }

        let move_in = input.move_in()?;

        let year = input.move_in_year;
        if year < self.min_year || year > self.max_year {
            return Err(ProrationError::invalid(
                "move_in_year",
                format!(
                    "year must be between {} and {}, got {year}",
                    self.min_year, self.max_year
                ),
            ));
        }

        Ok(move_in)
    }

    /// Like [`validate`](Self::validate), and additionally requires every
    /// amount derived from `area` under `rates` to stay finite.
    pub fn validate_with_rates(
        &self,
        input: &CalculationInput,
        rates: &RateSchedule,
    ) -> Result<YearMonth, ProrationError> {
        let move_in = self.validate(input)?;

        let deposit = rates.old_monthly(input.area) * f64::from(CYCLE_MONTHS);
        let quarter = rates.new_monthly(input.area) * f64::from(QUARTER_MONTHS);
        if !deposit.is_finite() || !quarter.is_finite() {
            return Err(ProrationError::invalid(
                "area",
                format!("area {} is too large to bill", input.area),
            ));
        }

        Ok(move_in)
    }

    /// Checks the bounds themselves are usable.
    pub fn check(&self) -> Result<(), ProrationError> {
        if self.min_year > self.max_year {
            return Err(ProrationError::invalid(
                "bounds",
                format!("min_year {} is after max_year {}", self.min_year, self.max_year),
            ));
        }
        if let (Some(min), Some(max)) = (self.min_area, self.max_area) {
            if min > max {
                return Err(ProrationError::invalid(
                    "bounds",
                    format!("min_area {min} is above max_area {max}"),
                ));
            }
        }
        Ok(())
    }
}
