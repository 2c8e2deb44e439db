//! Request types for the Leave Policy Engine API.
//!
//! This module defines the JSON bodies and query strings accepted by the
//! leave, balance and admin endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{EmployeeId, LeaveApplication, LeaveType};

/// Request body for `POST /leaves`.
///
/// The applying employee comes from the caller's identity, never the body.
///
/// # Example JSON
///
/// ```json
/// {
///   "leave_type": "vacation",
///   "start_date": "2025-03-10",
///   "end_date": "2025-03-12",
///   "reason": "Family trip"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitLeaveRequest {
    /// The kind of leave.
    pub leave_type: LeaveType,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Why the leave is needed.
    pub reason: String,
}

impl SubmitLeaveRequest {
    /// Builds the engine application for `employee_id`.
    pub fn into_application(self, employee_id: EmployeeId) -> LeaveApplication {
        LeaveApplication {
            employee_id,
            leave_type: self.leave_type,
            start_date: self.start_date,
            end_date: self.end_date,
            reason: self.reason,
        }
    }
}

/// Optional body for the approve and decline endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRequest {
    /// Remarks recorded with the decision.
    #[serde(default)]
    pub remarks: Option<String>,
}

/// Query string for the balance endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct BalanceQuery {
    /// Ledger year; defaults to the current year.
    pub year: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_submit_request() {
        let json = r#"{
            "leave_type": "sick",
            "start_date": "2025-04-01",
            "end_date": "2025-04-02",
            "reason": "Flu"
        }"#;
        let request: SubmitLeaveRequest = serde_json::from_str(json).unwrap();
        let application = request.into_application(1001);

        assert_eq!(application.employee_id, 1001);
        assert_eq!(application.leave_type, LeaveType::Sick);
        assert_eq!(application.reason, "Flu");
    }

    #[test]
    fn test_submit_request_ignores_body_employee_id() {
        let json = r#"{
            "employee_id": 1,
            "leave_type": "vacation",
            "start_date": "2025-04-01",
            "end_date": "2025-04-02",
            "reason": "Trip"
        }"#;
        let request: SubmitLeaveRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.into_application(1001).employee_id, 1001);
    }

    #[test]
    fn test_decision_remarks_are_optional() {
        let empty: DecisionRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.remarks.is_none());

        let with: DecisionRequest = serde_json::from_str(r#"{"remarks":"Enjoy"}"#).unwrap();
        assert_eq!(with.remarks.as_deref(), Some("Enjoy"));
    }
}
