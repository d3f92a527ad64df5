//! Calendar dates in the `DD/MM/YYYY` form used throughout the inventory.
//!
//! A [`StockDate`] can only be obtained through [`StockDate::parse`], so every
//! date held by a record has already passed validation. Field order is
//! `(year, month, day)`, which makes the derived `Ord` the chronological order.

use crate::error::{Result, StockzError};
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

pub const MIN_YEAR: i32 = 2000;
pub const MAX_YEAR: i32 = 2100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StockDate {
    year: u16,
    month: u8,
    day: u8,
}

impl StockDate {
    /// Parses and validates a `DD/MM/YYYY` string.
    ///
    /// The string must be exactly ten characters with `/` at positions 2 and 5
    /// and digits everywhere else. The year must lie in 2000..=2100 and the day
    /// must exist in that month, leap years included.
    pub fn parse(input: &str) -> Result<Self> {
        if input.is_empty() {
            return Err(StockzError::InvalidDate("date cannot be empty".into()));
        }

        let bytes = input.as_bytes();
        if bytes.len() != 10 {
            return Err(StockzError::InvalidDate(format!(
                "'{}' must be DD/MM/YYYY (e.g. 15/01/2024)",
                input
            )));
        }
        if bytes[2] != b'/' || bytes[5] != b'/' {
            return Err(StockzError::InvalidDate(format!(
                "'{}' must use '/' as separator",
                input
            )));
        }
        let digits_ok = bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 2 || i == 5 || b.is_ascii_digit());
        if !digits_ok {
            return Err(StockzError::InvalidDate(format!(
                "'{}' must be DD/MM/YYYY (e.g. 15/01/2024)",
                input
            )));
        }

        // All digit checks passed, so these slices parse.
        let day: u32 = input[0..2].parse().unwrap_or(0);
        let month: u32 = input[3..5].parse().unwrap_or(0);
        let year: i32 = input[6..10].parse().unwrap_or(0);

        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(StockzError::InvalidDate(format!(
                "year must be between {} and {}",
                MIN_YEAR, MAX_YEAR
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(StockzError::InvalidDate(
                "month must be between 1 and 12".into(),
            ));
        }
        if NaiveDate::from_ymd_opt(year, month, day).is_none() {
            return Err(StockzError::InvalidDate(format!(
                "day must be between 1 and {} for month {}",
                days_in_month(year, month),
                month
            )));
        }

        Ok(Self {
            year: year as u16,
            month: month as u8,
            day: day as u8,
        })
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    (28..=31)
        .rev()
        .find(|&d| NaiveDate::from_ymd_opt(year, month, d).is_some())
        .unwrap_or(28)
}

impl fmt::Display for StockDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/{:04}", self.day, self.month, self.year)
    }
}

impl FromStr for StockDate {
    type Err = StockzError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_leap_day_in_leap_year() {
        let d = StockDate::parse("29/02/2024").unwrap();
        assert_eq!((d.day(), d.month(), d.year()), (29, 2, 2024));
    }

    #[test]
    fn rejects_leap_day_in_common_year() {
        assert!(matches!(
            StockDate::parse("29/02/2023"),
            Err(StockzError::InvalidDate(_))
        ));
        // 2100 is not a leap year, 2000 is.
        assert!(StockDate::parse("29/02/2100").is_err());
        assert!(StockDate::parse("29/02/2000").is_ok());
    }

    #[test]
    fn rejects_out_of_range_fields() {
        assert!(StockDate::parse("32/01/2024").is_err());
        assert!(StockDate::parse("00/01/2024").is_err());
        assert!(StockDate::parse("15/13/2024").is_err());
        assert!(StockDate::parse("15/00/2024").is_err());
        assert!(StockDate::parse("31/04/2024").is_err());
        assert!(StockDate::parse("15/01/1999").is_err());
        assert!(StockDate::parse("15/01/2101").is_err());
    }

    #[test]
    fn rejects_malformed_strings() {
        for bad in [
            "",
            "15-01-2024",
            "1/1/2024",
            "15/01/24",
            "15/01/2024 ",
            "2024/01/15",
            "ab/cd/efgh",
            "+1/01/2024",
        ] {
            assert!(StockDate::parse(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn displays_in_input_form() {
        let d: StockDate = "05/02/2024".parse().unwrap();
        assert_eq!(d.to_string(), "05/02/2024");
    }

    #[test]
    fn orders_chronologically() {
        let a = StockDate::parse("31/12/2023").unwrap();
        let b = StockDate::parse("01/01/2024").unwrap();
        let c = StockDate::parse("02/01/2024").unwrap();
        assert!(a < b && b < c);
        assert_eq!(b.cmp(&StockDate::parse("01/01/2024").unwrap()), std::cmp::Ordering::Equal);
    }
}
