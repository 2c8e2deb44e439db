//! Blackout period model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::DateRange;
use crate::error::{EngineError, EngineResult};

/// How strongly a blackout period restricts leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RestrictionLevel {
    /// No leave may be taken.
    NoLeave,
    /// Leave is restricted.
    #[default]
    Restricted,
}

/// An administrator-defined date range during which leave is restricted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlackoutPeriod {
    /// Display name, reported in conflict errors.
    pub name: String,
    /// First blacked-out day.
    pub start_date: NaiveDate,
    /// Last blacked-out day (inclusive).
    pub end_date: NaiveDate,
    /// Why the period is blacked out.
    pub reason: String,
    /// Restriction level.
    #[serde(default)]
    pub restriction_level: RestrictionLevel,
    /// Inactive periods are ignored by the conflict detector.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl BlackoutPeriod {
    /// The period's date range, rejecting `end_date < start_date`.
    pub fn period(&self) -> EngineResult<DateRange> {
        DateRange::new(self.start_date, self.end_date).map_err(|_| EngineError::Validation {
            field: "blackout_period".to_string(),
            message: format!(
                "'{}' ends on {} before it starts on {}",
                self.name, self.end_date, self.start_date
            ),
        })
    }
}
