use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::core::errors::{PlanError, Result};

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// A calendar month. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(PlanError::validation(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(PlanError::validation(format!(
                "year must be between {MIN_YEAR} and {MAX_YEAR}, got {year}"
            )));
        }
        Ok(Self { year, month })
    }

    /// Parses a `YYYY-MM` string. Single-digit months (`2025-9`) are accepted.
    pub fn parse(input: &str) -> Result<Self> {
        let raw = input.trim();
        let invalid = || PlanError::validation(format!("invalid month `{raw}`, expected YYYY-MM"));
        let (year, month) = raw.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if month.is_empty() || month.len() > 2 || !month.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
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

    /// Canonical first day of the month.
    pub fn start(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("month fields are validated")
    }

    /// First day of the following month; the exclusive upper bound of this month.
    pub fn end_exclusive(&self) -> NaiveDate {
        self.next().start()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Month::containing(date) == *self
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

    /// Shifts the month by `count` (negative moves backwards).
    pub fn add_months(&self, count: i32) -> Self {
        let index = self.index() + count;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    /// Like [`Month::add_months`], but `None` when the result leaves the supported year range.
    pub fn checked_add_months(&self, count: i32) -> Option<Self> {
        let index = self.index().checked_add(count)?;
        let year = index.div_euclid(12);
        (MIN_YEAR..=MAX_YEAR).contains(&year).then(|| Self {
            year,
            month: index.rem_euclid(12) as u32 + 1,
        })
    }

    fn index(&self) -> i32 {
        self.year * 12 + self.month as i32 - 1
    }
}

/// `(b.year - a.year) * 12 + (b.month - a.month)`; negative when `b` precedes `a`.
pub fn months_between(a: Month, b: Month) -> i32 {
    (b.year - a.year) * 12 + (b.month as i32 - a.month as i32)
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self> {
        Month::parse(s)
    }
}

impl Serialize for Month {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Month::parse(&raw).map_err(de::Error::custom)
    }
}
