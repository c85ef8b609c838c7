//! Common types used across the platform

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A monthly demand period.
///
/// Stored as an ordinal month count (`year * 12 + month - 1`) so that
/// consecutive months are consecutive integers and `period % 12` is the
/// calendar month position (0 = January).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Period(pub u32);

impl Period {
    pub const MONTHS_PER_YEAR: u32 = 12;

    /// Build a period from a calendar year and a 1-based month
    pub fn from_year_month(year: i32, month: u32) -> Option<Self> {
        if year < 0 || !(1..=12).contains(&month) {
            return None;
        }
        Some(Period(year as u32 * Self::MONTHS_PER_YEAR + (month - 1)))
    }

    /// Period containing the given date
    pub fn from_date<D: Datelike>(date: &D) -> Self {
        let year = date.year().max(0) as u32;
        Period(year * Self::MONTHS_PER_YEAR + date.month0())
    }

    pub fn year(&self) -> i32 {
        (self.0 / Self::MONTHS_PER_YEAR) as i32
    }

    /// 1-based calendar month
    pub fn month(&self) -> u32 {
        self.0 % Self::MONTHS_PER_YEAR + 1
    }

    /// Cyclic position of this period for a season of `cycle_length` periods
    pub fn position(&self, cycle_length: u32) -> usize {
        (self.0 % cycle_length.max(1)) as usize
    }

    pub fn offset(&self, periods: u32) -> Self {
        Period(self.0 + periods)
    }

    pub fn next(&self) -> Self {
        self.offset(1)
    }

    /// Number of periods from `self` to `later` (0 if `later` is not after `self`)
    pub fn distance_to(&self, later: Period) -> u32 {
        later.0.saturating_sub(self.0)
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year(), self.month(), 1)
    }

    /// `YYYY-MM` label used by the dashboard charts
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year(), self.month())
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// English month name for a 1-based month number
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}
