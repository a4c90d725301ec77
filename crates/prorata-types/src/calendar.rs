//! Month-granular calendar arithmetic.
//!
//! Billing in this domain never looks below the month, so a date is just a
//! `(year, month)` pair. Ordering is lexicographic: year first, then month.

use crate::ProrationError;
use chrono::Month;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Returns the English name of a month number (`1` → `"January"`).
pub fn month_name(month: u32) -> Option<&'static str> {
    let month = u8::try_from(month).ok()?;
    Month::try_from(month).ok().map(|m| m.name())
}

/// A calendar month within a specific year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawYearMonth")]
pub struct YearMonth {
    // Field order matters: the derived `Ord` compares year before month.
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct RawYearMonth {
    year: i32,
    month: u32,
}

impl TryFrom<RawYearMonth> for YearMonth {
    type Error = ProrationError;

    fn try_from(raw: RawYearMonth) -> Result<Self, Self::Error> {
        Self::new(raw.year, raw.month)
    }
}

impl YearMonth {
    /// Creates a month, rejecting month numbers outside `1..=12`.
    pub fn new(year: i32, month: u32) -> Result<Self, ProrationError> {
        if !(1..=12).contains(&month) {
            return Err(ProrationError::invalid(
                "month",
                format!("expected a month between 1 and 12, got {month}"),
            ));
        }
        Ok(Self { year, month })
    }

    /// Infallible constructor from a typed [`chrono::Month`].
    pub fn of(year: i32, month: Month) -> Self {
        Self { year, month: month.number_from_month() }
    }

    /// Calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month number, `1..=12`.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Months elapsed since January of year 0. Consecutive months differ by one.
    pub fn ordinal(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month - 1)
    }

    /// Advances by `months` whole months, carrying into following years.
    pub fn add_months(&self, months: u32) -> Self {
        let target = self.ordinal() + i64::from(months);
        let year = i32::try_from(target.div_euclid(12)).unwrap_or(i32::MAX);
        // rem_euclid(12) is always in 0..12
        let month = target.rem_euclid(12) as u32 + 1;
        Self { year, month }
    }

    /// The month immediately before this one.
    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    /// English name of the month, e.g. `"March"`.
    pub fn month_name(&self) -> &'static str {
        month_name(self.month).unwrap_or("Unknown")
    }

    /// Billing quarter this month falls in.
    pub fn quarter(&self) -> Quarter {
        match self.month {
            1..=3 => Quarter::Q1,
            4..=6 => Quarter::Q2,
            7..=9 => Quarter::Q3,
            // `new` and `of` keep month in 1..=12
            _ => Quarter::Q4,
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}

/// Fixed three-month billing quarter of a calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quarter {
    /// January to March.
    Q1,
    /// April to June.
    Q2,
    /// July to September.
    Q3,
    /// October to December.
    Q4,
}

impl Quarter {
    /// Quarter containing month number `month`, or `None` outside `1..=12`.
    pub fn from_month(month: u32) -> Option<Self> {
        match month {
            1..=3 => Some(Self::Q1),
            4..=6 => Some(Self::Q2),
            7..=9 => Some(Self::Q3),
            10..=12 => Some(Self::Q4),
            _ => None,
        }
    }

    /// Display label including the month span, e.g. `"Q1 (Jan–Mar)"`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Q1 => "Q1 (Jan–Mar)",
            Self::Q2 => "Q2 (Apr–Jun)",
            Self::Q3 => "Q3 (Jul–Sep)",
            Self::Q4 => "Q4 (Oct–Dec)",
        }
    }

    /// First month number of the quarter.
    pub fn first_month(&self) -> u32 {
        match self {
            Self::Q1 => 1,
            Self::Q2 => 4,
            Self::Q3 => 7,
            Self::Q4 => 10,
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
            Self::Q4 => "Q4",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn rejects_out_of_range_months() {
        assert!(YearMonth::new(2025, 0).is_err());
        assert!(YearMonth::new(2025, 13).is_err());
        assert_eq!(YearMonth::new(2025, 0).unwrap_err().field(), "month");
        assert_eq!(YearMonth::of(2025, Month::April), ym(2025, 4));
    }

    #[test]
    fn orders_year_before_month() {
        assert!(ym(2024, 12) < ym(2025, 1));
        assert!(ym(2025, 3) < ym(2025, 4));
        assert!(ym(2025, 4) >= ym(2025, 4));
    }

    #[test]
    fn add_months_carries_into_next_year() {
        assert_eq!(ym(2025, 4).add_months(0), ym(2025, 4));
        assert_eq!(ym(2025, 4).add_months(8), ym(2025, 12));
        assert_eq!(ym(2025, 4).add_months(9), ym(2026, 1));
        assert_eq!(ym(2025, 4).add_months(11), ym(2026, 3));
        assert_eq!(ym(2025, 4).add_months(15), ym(2026, 7));
        assert_eq!(ym(2025, 4).add_months(33), ym(2028, 1));
    }

    #[test]
    fn previous_wraps_january() {
        assert_eq!(ym(2025, 1).previous(), ym(2024, 12));
        assert_eq!(ym(2025, 4).previous(), ym(2025, 3));
    }

    #[test]
    fn displays_month_name_and_year() {
        assert_eq!(ym(2026, 3).to_string(), "March 2026");
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn quarters_partition_the_year() {
        let quarters: Vec<Quarter> = (1..=12).filter_map(Quarter::from_month).collect();
        assert_eq!(quarters.len(), 12);
        assert_eq!(&quarters[0..3], &[Quarter::Q1; 3]);
        assert_eq!(&quarters[3..6], &[Quarter::Q2; 3]);
        assert_eq!(&quarters[6..9], &[Quarter::Q3; 3]);
        assert_eq!(&quarters[9..12], &[Quarter::Q4; 3]);
        assert_eq!(Quarter::Q3.label(), "Q3 (Jul–Sep)");
        assert_eq!(Quarter::Q4.first_month(), 10);
    }

    #[test]
    fn from_month_rejects_out_of_range_numbers() {
        assert_eq!(Quarter::from_month(0), None);
        assert_eq!(Quarter::from_month(13), None);
        for month in 1..=12 {
            assert_eq!(Quarter::from_month(month), Some(ym(2025, month).quarter()));
        }
    }

    #[test]
    fn deserialization_validates_month() {
        let ok: YearMonth = serde_json::from_str(r#"{"year":2025,"month":4}"#).unwrap();
        assert_eq!(ok, ym(2025, 4));
        assert!(serde_json::from_str::<YearMonth>(r#"{"year":2025,"month":14}"#).is_err());
    }
}
