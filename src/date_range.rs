//! Inclusive UTC date ranges used to query transaction history.

use time::{Date, Duration};

use crate::{Error, transaction::Timestamp};

/// The longest date range, in days, that history may be queried for.
pub const MAX_DATE_RANGE_DAYS: i64 = 90;

/// An inclusive range of calendar dates in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    from: Date,
    to: Date,
}

impl DateRange {
    /// Create a range from `from` to `to`, both inclusive.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidDateRange] if `to` is before `from`,
    /// - or [Error::DateRangeTooLarge] if the range spans more than [MAX_DATE_RANGE_DAYS] days.
    pub fn new(from: Date, to: Date) -> Result<Self, Error> {
        if to < from {
            return Err(Error::InvalidDateRange { from, to });
        }

        let span = (to - from).whole_days();

        if span > MAX_DATE_RANGE_DAYS {
            return Err(Error::DateRangeTooLarge(span));
        }

        Ok(Self { from, to })
    }

    /// The default range: the [MAX_DATE_RANGE_DAYS] days leading up to `today`.
    pub fn ending_on(today: Date) -> Self {
        let from = today
            .checked_sub(Duration::days(MAX_DATE_RANGE_DAYS))
            .unwrap_or(Date::MIN);

        Self { from, to: today }
    }

    /// The first day of the range.
    pub fn from(&self) -> Date {
        self.from
    }

    /// The last day of the range.
    pub fn to(&self) -> Date {
        self.to
    }

    /// Whether `timestamp` falls on a day inside the range.
    pub fn contains(&self, timestamp: &Timestamp) -> bool {
        let date = timestamp.date();
        self.from <= date && date <= self.to
    }
}
