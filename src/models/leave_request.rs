//! Leave request model and related types.
//!
//! This module defines the [`LeaveRequest`] record, its [`LeaveStatus`], and
//! the [`LeaveApplication`] an employee submits to create one.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{DateRange, LeaveType};

/// Identifier of an employee, issued by the external identity provider.
pub type EmployeeId = u64;

/// Identifier of a leave request, issued by the request store.
pub type RequestId = u64;

/// Lifecycle status of a leave request.
///
/// `Pending` is the only non-terminal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Submitted and awaiting an admin decision.
    Pending,
    /// Approved by an admin; the ledger has been debited.
    Approved,
    /// Declined by an admin.
    Declined,
    /// Withdrawn by the owning employee before a decision.
    Cancelled,
}

impl LeaveStatus {
    /// Returns true if no further transition is permitted.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LeaveStatus::Pending)
    }

    /// The wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Declined => "declined",
            LeaveStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An employee's application for leave, prior to validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveApplication {
    /// The applying employee.
    pub employee_id: EmployeeId,
    /// The kind of leave.
    pub leave_type: LeaveType,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Why the leave is needed. Must not be blank.
    pub reason: String,
}

/// A persisted leave request.
///
/// `duration` is derived from the date range once, at creation, and never
/// changes afterwards because the dates are immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaveRequest {
    /// Store-assigned identifier.
    pub id: RequestId,
    /// The owning employee.
    pub employee_id: EmployeeId,
    /// The kind of leave.
    pub leave_type: LeaveType,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// The employee's stated reason.
    pub reason: String,
    /// Inclusive day count of `start_date..=end_date`.
    pub duration: u32,
    /// Current lifecycle status.
    pub status: LeaveStatus,
    /// When the request was created.
    pub submitted_at: DateTime<Utc>,
    /// The admin who approved or declined the request.
    pub approved_by: Option<EmployeeId>,
    /// When the request was approved or declined.
    pub approved_at: Option<DateTime<Utc>>,
    /// Remarks recorded with the decision.
    pub remarks: Option<String>,
}

impl LeaveRequest {
    /// Creates a pending request for a validated range.
    pub(crate) fn pending(
        id: RequestId,
        application: LeaveApplication,
        period: DateRange,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            employee_id: application.employee_id,
            leave_type: application.leave_type,
            start_date: period.start(),
            end_date: period.end(),
            reason: application.reason,
            duration: period.days(),
            status: LeaveStatus::Pending,
            submitted_at,
            approved_by: None,
            approved_at: None,
            remarks: None,
        }
    }

    /// The request's date range.
    pub fn period(&self) -> DateRange {
        DateRange::between(self.start_date, self.end_date)
    }

    /// The ledger year this request is charged against.
    pub fn ledger_year(&self) -> i32 {
        self.period().start_year()
    }

    /// Returns true if the request is approved and covers `date`.
    pub fn is_on_leave(&self, date: NaiveDate) -> bool {
        self.status == LeaveStatus::Approved && self.period().contains(date)
    }
}
