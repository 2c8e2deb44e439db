//! Blackout conflict detection.
//!
//! Finds the active blackout periods a candidate leave range intersects,
//! using closed-interval overlap (see [`DateRange::overlaps`]).

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{BlackoutPeriod, DateRange};

/// The blackout calendar, validated and ordered by start date.
///
/// # Example
///
/// ```
/// use leave_engine::models::{BlackoutPeriod, DateRange, RestrictionLevel};
/// use leave_engine::policy::BlackoutCalendar;
/// use chrono::NaiveDate;
///
/// let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
/// let calendar = BlackoutCalendar::new(vec![BlackoutPeriod {
///     name: "Year-End Closing".to_string(),
///     start_date: date(2025, 12, 25),
///     end_date: date(2026, 1, 2),
///     reason: "Annual closing".to_string(),
///     restriction_level: RestrictionLevel::NoLeave,
///     is_active: true,
/// }])
/// .unwrap();
///
/// let candidate = DateRange::new(date(2025, 12, 31), date(2026, 1, 1)).unwrap();
/// let conflicts = calendar.conflicts(&candidate);
/// assert_eq!(conflicts.len(), 1);
/// assert_eq!(conflicts[0].name, "Year-End Closing");
/// ```
#[derive(Debug, Clone, Default)]
pub struct BlackoutCalendar {
    entries: Vec<(DateRange, BlackoutPeriod)>,
}

impl BlackoutCalendar {
    /// Builds a calendar, rejecting any period whose end precedes its start.
    pub fn new(periods: Vec<BlackoutPeriod>) -> EngineResult<Self> {
        let mut entries = periods
            .into_iter()
            .map(|period| Ok((period.period()?, period)))
            .collect::<EngineResult<Vec<_>>>()?;
        entries.sort_by_key(|(range, _)| range.start());
        Ok(Self { entries })
    }

    /// All configured periods, active or not, ordered by start date.
    pub fn periods(&self) -> impl Iterator<Item = &BlackoutPeriod> {
        self.entries.iter().map(|(_, period)| period)
    }

    /// The active periods that intersect `candidate`.
    pub fn conflicts(&self, candidate: &DateRange) -> Vec<&BlackoutPeriod> {
        self.entries
            .iter()
            .filter(|(range, period)| period.is_active && range.overlaps(candidate))
            .map(|(_, period)| period)
            .collect()
    }

    /// Fails with `BlackoutConflict` naming every intersecting active period.
    pub fn ensure_clear(&self, candidate: &DateRange) -> EngineResult<()> {
        let conflicts = self.conflicts(candidate);
        if conflicts.is_empty() {
            return Ok(());
        }

        let periods: Vec<String> = conflicts.iter().map(|p| p.name.clone()).collect();
        debug!(candidate = %candidate, conflicts = ?periods, "Blackout conflict");
        Err(EngineError::BlackoutConflict { periods })
    }
}
