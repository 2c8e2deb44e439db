//! Inclusive calendar date ranges.
//!
//! Leave requests and blackout periods are both closed intervals of whole
//! days. [`DateRange`] owns the two derived facts the engine relies on: the
//! inclusive day count and the overlap predicate.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::{EngineError, EngineResult};

/// A closed interval `[start, end]` of calendar days with `start <= end`.
///
/// # Example
///
/// ```
/// use leave_engine::models::DateRange;
/// use chrono::NaiveDate;
///
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 3, 12).unwrap(),
/// )
/// .unwrap();
/// assert_eq!(range.days(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Builds a range, rejecting `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> EngineResult<Self> {
        if end < start {
            return Err(EngineError::Validation {
                field: "end_date".to_string(),
                message: format!("end date {} is before start date {}", end, start),
            });
        }
        Ok(Self { start, end })
    }

    /// The range spanning two dates given in either order.
    pub(crate) fn between(a: NaiveDate, b: NaiveDate) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// First day of the range.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range (inclusive).
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive number of days, always at least 1.
    pub fn days(&self) -> u32 {
        (self.end - self.start).num_days() as u32 + 1
    }

    /// The calendar year the range starts in.
    pub fn start_year(&self) -> i32 {
        self.start.year()
    }

    /// Whether `date` falls inside the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Closed-interval overlap: `[a1,a2]` and `[b1,b2]` intersect iff
    /// `a1 <= b2 && a2 >= b1`.
    ///
    /// This one test covers a range starting inside, ending inside, or
    /// spanning the other.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && self.end >= other.start
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
