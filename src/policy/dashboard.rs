//! Dashboard aggregation.
//!
//! Counters are recomputed from request state on every call; nothing is
//! cached between calls.

use chrono::{Duration, NaiveDate};

use crate::models::{DashboardStats, LeaveRequest, LeaveRequestView, LeaveStatus};
use crate::store::EmployeeDirectory;

/// Computes the dashboard counters for `today`.
///
/// `upcoming_expirations` counts approved requests whose end date falls in
/// `[today, today + window_days]`, clamped to the last representable date.
/// `policy_violations` is always zero.
///
/// # Example
///
/// ```
/// use leave_engine::policy::summarize;
/// use chrono::NaiveDate;
///
/// let stats = summarize(&[], NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(), 30);
/// assert_eq!(stats.pending_approvals, 0);
/// assert_eq!(stats.policy_violations, 0);
/// ```
pub fn summarize(requests: &[LeaveRequest], today: NaiveDate, window_days: u32) -> DashboardStats {
    let window_end = today
        .checked_add_signed(Duration::days(i64::from(window_days)))
        .unwrap_or(NaiveDate::MAX);

    let pending_approvals = requests
        .iter()
        .filter(|r| r.status == LeaveStatus::Pending)
        .count();

    let on_leave_today = requests.iter().filter(|r| r.is_on_leave(today)).count();

    let upcoming_expirations = requests
        .iter()
        .filter(|r| r.status == LeaveStatus::Approved)
        .filter(|r| r.end_date >= today && r.end_date <= window_end)
        .count();

    DashboardStats {
        pending_approvals,
        on_leave_today,
        policy_violations: 0,
        upcoming_expirations,
    }
}

/// Joins requests with their owners' display fields.
pub fn enrich(
    requests: Vec<LeaveRequest>,
    directory: &dyn EmployeeDirectory,
) -> Vec<LeaveRequestView> {
    requests
        .into_iter()
        .map(|request| {
            let profile = directory.profile(request.employee_id);
            LeaveRequestView::new(request, profile.as_ref())
        })
        .collect()
}
