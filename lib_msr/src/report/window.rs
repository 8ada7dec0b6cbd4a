//! # Reporting Window
//!
//! This module defines the [`TimeWindow`] type: the inclusive date range a
//! status report covers. By default a report covers the entirety of the
//! calendar month preceding the current UTC date.
//!
//! The window also carries the quantities the rest of the pipeline derives
//! from it: the inclusive span in days (used in cache file names) and the
//! Unix-epoch bounds (used as query parameters for the activity source).

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Utc};
use thiserror::Error;

/// Errors raised when constructing a [`TimeWindow`] from explicit dates.
#[derive(Debug, Error)]
pub enum WindowError {
    /// The requested start date lies after the requested end date.
    #[error("window start {start} is after window end {end}")]
    Inverted {
        /// The offending start date.
        start: NaiveDate,
        /// The offending end date.
        end: NaiveDate,
    },
}

/// # Time Window
///
/// The inclusive reporting period `[start, end]`. Created once per run and
/// immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    /// First day of the reporting period.
    pub start: NaiveDate,
    /// Last day of the reporting period (inclusive).
    pub end: NaiveDate,
}

impl TimeWindow {
    /// Builds a window from explicit dates, rejecting an inverted range.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, WindowError> {
        if start > end {
            return Err(WindowError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns the window covering the entire calendar month preceding the
    /// current UTC date.
    pub fn previous_month() -> Self {
        Self::previous_month_of(Utc::now().date_naive())
    }

    /// # Previous Month Of
    ///
    /// Returns the window covering the calendar month preceding `today`.
    ///
    /// ## Logic:
    /// 1. Step back by `today`'s day-of-month to land on the last day of
    ///    the previous month.
    /// 2. Step back by that date's day-of-month minus one to land on the
    ///    previous month's first day.
    pub fn previous_month_of(today: NaiveDate) -> Self {
        let end = today - Duration::days(i64::from(today.day()));
        let start = end - Duration::days(i64::from(end.day()) - 1);
        Self { start, end }
    }

    /// Inclusive length of the window in days.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Unix epoch seconds for the start date at midnight UTC.
    pub fn epoch_start(&self) -> i64 {
        self.start.and_time(NaiveTime::MIN).and_utc().timestamp()
    }

    /// Unix epoch seconds for the end date at midnight UTC.
    pub fn epoch_end(&self) -> i64 {
        self.end.and_time(NaiveTime::MIN).and_utc().timestamp()
    }
}
