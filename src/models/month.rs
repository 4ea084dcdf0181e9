//! Calendar month identifier ("YYYY-MM")
//!
//! Budgets are scoped to one calendar month. The string form is what gets
//! stored and what expense dates are matched against.

use chrono::{Datelike, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::FiscalError;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar month, e.g. 2024-05
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthYear {
    year: i32,
    month: u32,
}

impl MonthYear {
    /// Create a month; `month` is 1-based
    pub fn new(year: i32, month: u32) -> Result<Self, FiscalError> {
        if !(1..=12).contains(&month) {
            return Err(FiscalError::Validation(format!(
                "Month must be between 1 and 12, got {}",
                month
            )));
        }
        if !(0..=9999).contains(&year) {
            return Err(FiscalError::Validation(format!(
                "Year must have four digits, got {}",
                year
            )));
        }
        Ok(Self { year, month })
    }

    /// The month containing today's local date
    pub fn current() -> Self {
        Self::of_date(chrono::Local::now().date_naive())
    }

    pub fn of_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Check whether a stored ISO-8601 date string falls in this month
    ///
    /// Matching is a prefix test on the stored string, so an expense belongs to
    /// the month written in its date text regardless of time zone.
    pub fn matches_date_str(&self, iso_date: &str) -> bool {
        iso_date.starts_with(&self.to_string())
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Human-friendly form, e.g. "May 2024"
    pub fn display_name(&self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthYear {
    type Err = FiscalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || FiscalError::Validation(format!("Invalid month '{}' (expected YYYY-MM)", s));

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl Serialize for MonthYear {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthYear {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let m: MonthYear = "2024-05".parse().unwrap();
        assert_eq!(m.year(), 2024);
        assert_eq!(m.month(), 5);
        assert_eq!(m.to_string(), "2024-05");
        assert_eq!(m.display_name(), "May 2024");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("2024-13".parse::<MonthYear>().is_err());
        assert!("2024-5".parse::<MonthYear>().is_err());
        assert!("May 2024".parse::<MonthYear>().is_err());
        assert!("".parse::<MonthYear>().is_err());
    }

    #[test]
    fn test_matches_date_prefix() {
        let m: MonthYear = "2024-05".parse().unwrap();
        assert!(m.matches_date_str("2024-05-31T23:59:59.000Z"));
        assert!(m.matches_date_str("2024-05-01T00:00:00Z"));
        assert!(!m.matches_date_str("2024-06-01T00:00:00Z"));
        assert!(!m.matches_date_str("2023-05-10T00:00:00Z"));
    }

    #[test]
    fn test_navigation() {
        let jan: MonthYear = "2024-01".parse().unwrap();
        assert_eq!(jan.previous().to_string(), "2023-12");
        assert_eq!(jan.next().to_string(), "2024-02");
        let dec: MonthYear = "2024-12".parse().unwrap();
        assert_eq!(dec.next().to_string(), "2025-01");
    }

    #[test]
    fn test_serde_as_string() {
        let m = MonthYear::new(2024, 3).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "\"2024-03\"");
        let back: MonthYear = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn test_ordering() {
        let a: MonthYear = "2023-12".parse().unwrap();
        let b: MonthYear = "2024-01".parse().unwrap();
        assert!(a < b);
    }
}
