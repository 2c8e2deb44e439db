//! Leave request state machine.
//!
//! ```text
//! pending ──approve──▶ approved
//!    │    ──decline──▶ declined
//!    └────cancel─────▶ cancelled
//! ```
//!
//! Every other (status, action) pair is an invalid transition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeId, LeaveRequest, LeaveStatus};

/// An operation that moves a request out of `pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveAction {
    /// Admin approval.
    Approve,
    /// Admin decline.
    Decline,
    /// Withdrawal by the owning employee.
    Cancel,
}

impl LeaveAction {
    /// The wire name of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveAction::Approve => "approve",
            LeaveAction::Decline => "decline",
            LeaveAction::Cancel => "cancel",
        }
    }

    /// Returns true if only administrators may perform the action.
    pub fn requires_admin(&self) -> bool {
        matches!(self, LeaveAction::Approve | LeaveAction::Decline)
    }
}

impl std::fmt::Display for LeaveAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The status `action` leads to from `status`, or `None` if not allowed.
///
/// # Example
///
/// ```
/// use leave_engine::models::LeaveStatus;
/// use leave_engine::policy::{next_status, LeaveAction};
///
/// assert_eq!(next_status(LeaveStatus::Pending, LeaveAction::Approve), Some(LeaveStatus::Approved));
/// assert_eq!(next_status(LeaveStatus::Approved, LeaveAction::Cancel), None);
/// ```
pub fn next_status(status: LeaveStatus, action: LeaveAction) -> Option<LeaveStatus> {
    match (status, action) {
        (LeaveStatus::Pending, LeaveAction::Approve) => Some(LeaveStatus::Approved),
        (LeaveStatus::Pending, LeaveAction::Decline) => Some(LeaveStatus::Declined),
        (LeaveStatus::Pending, LeaveAction::Cancel) => Some(LeaveStatus::Cancelled),
        _ => None,
    }
}

/// Checks that `action` is allowed on `request` and returns the target status.
pub fn ensure_transition(request: &LeaveRequest, action: LeaveAction) -> EngineResult<LeaveStatus> {
    next_status(request.status, action).ok_or(EngineError::InvalidTransition {
        request_id: request.id,
        status: request.status,
        action,
    })
}

/// Records an admin decision (approve or decline) on a request.
pub(crate) fn record_decision(
    request: &mut LeaveRequest,
    status: LeaveStatus,
    decided_by: EmployeeId,
    decided_at: DateTime<Utc>,
    remarks: Option<String>,
) {
    request.status = status;
    request.approved_by = Some(decided_by);
    request.approved_at = Some(decided_at);
    request.remarks = remarks;
}
