//! Core data models for the Leave Policy Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod blackout;
mod dashboard;
mod date_range;
mod employee;
mod leave_balance;
mod leave_request;
mod leave_type;

pub use blackout::{BlackoutPeriod, RestrictionLevel};
pub use dashboard::{Dashboard, DashboardStats, LeaveRequestView, LeaveTypeSummary};
pub use date_range::DateRange;
pub use employee::{Caller, EmployeeProfile, Role};
pub use leave_balance::{BalanceSnapshot, LeaveBalance, LedgerKey};
pub use leave_request::{EmployeeId, LeaveApplication, LeaveRequest, LeaveStatus, RequestId};
pub use leave_type::LeaveType;
