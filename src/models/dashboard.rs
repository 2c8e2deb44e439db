//! Dashboard value types.
//!
//! These are read-side projections; none of them is stored.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::{BlackoutPeriod, EmployeeProfile, LeaveRequest, LeaveType};

/// The four administrative counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DashboardStats {
    /// Requests awaiting a decision.
    pub pending_approvals: usize,
    /// Approved requests covering today.
    pub on_leave_today: usize,
    /// Reserved; always zero.
    pub policy_violations: usize,
    /// Approved requests ending within the upcoming window.
    pub upcoming_expirations: usize,
}

/// A leave request joined with its owner's display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaveRequestView {
    /// The request itself.
    #[serde(flatten)]
    pub request: LeaveRequest,
    /// Owner's display name, if the directory knows the employee.
    pub employee_name: Option<String>,
    /// Owner's department.
    pub employee_department: Option<String>,
    /// Owner's employee code.
    pub employee_code: Option<String>,
}

impl LeaveRequestView {
    /// Joins a request with an optional profile.
    pub fn new(request: LeaveRequest, profile: Option<&EmployeeProfile>) -> Self {
        Self {
            request,
            employee_name: profile.map(|p| p.display_name.clone()),
            employee_department: profile.and_then(|p| p.department.clone()),
            employee_code: profile.map(|p| p.employee_code.clone()),
        }
    }
}

/// Catalogue entry for a leave type, as shown to administrators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaveTypeSummary {
    /// The leave type.
    pub leave_type: LeaveType,
    /// Display name.
    pub name: String,
    /// Short code.
    pub code: String,
    /// Description.
    pub description: String,
    /// Yearly entitlement, or `None` when not balance-tracked.
    pub default_entitlement: Option<Decimal>,
}

/// The full administrative dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    /// The date the counters were computed for.
    pub as_of: NaiveDate,
    /// Counters.
    #[serde(flatten)]
    pub stats: DashboardStats,
    /// All requests, newest first, with owner display fields.
    pub requests: Vec<LeaveRequestView>,
    /// Active leave types.
    pub leave_types: Vec<LeaveTypeSummary>,
    /// The blackout calendar, ordered by start date.
    pub blackout_periods: Vec<BlackoutPeriod>,
}
