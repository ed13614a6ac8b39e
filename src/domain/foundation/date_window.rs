//! Calendar-date intervals shared by memberships and program cycles.
//!
//! Both kinds of interval are inclusive on both ends and compare plain
//! calendar dates; callers normalize instants with [`Timestamp::date`]
//! before asking whether a window holds.
//!
//! [`Timestamp::date`]: super::Timestamp::date

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Inclusive date window whose end may be left open.
///
/// Membership rows are written elsewhere and are not validated here, so a
/// window with `end < start` is representable; it simply never holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    start: NaiveDate,
    end: Option<NaiveDate>,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Window that starts on `start` and never ends.
    pub fn open_ended(start: NaiveDate) -> Self {
        Self { start, end: None }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    pub fn is_open_ended(&self) -> bool {
        self.end.is_none()
    }

    /// True when `date` falls inside the window, both bounds included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && self.end.map_or(true, |end| end >= date)
    }
}

/// Closed date range whose end is never before its start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DateRangeParts", into = "DateRangeParts")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Serialize, Deserialize)]
struct DateRangeParts {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Builds a range, rejecting one that ends before it starts.
    ///
    /// A single-day range (`start == end`) is valid.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::inverted_range(start, end));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// True when `date` falls inside the range, both bounds included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.as_window().contains(date)
    }

    /// Returns the range with whichever bounds were supplied replaced, keeping
    /// the stored value for the others, and re-validates the result.
    pub fn with_bounds(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Self, ValidationError> {
        Self::new(start.unwrap_or(self.start), end.unwrap_or(self.end))
    }

    pub fn as_window(&self) -> DateWindow {
        DateWindow::new(self.start, Some(self.end))
    }
}

impl TryFrom<DateRangeParts> for DateRange {
    type Error = ValidationError;

    fn try_from(parts: DateRangeParts) -> Result<Self, Self::Error> {
        Self::new(parts.start, parts.end)
    }
}

impl From<DateRange> for DateRangeParts {
    fn from(range: DateRange) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}
