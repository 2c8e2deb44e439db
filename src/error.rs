//! Error types for the Leave Policy Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine reports. Business-rule failures (validation,
//! conflicts, balance, authorization, transitions) are permanent until the
//! input changes; none of them leave partially written state behind.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{LeaveStatus, LeaveType, RequestId};
use crate::policy::LeaveAction;

/// The main error type for the Leave Policy Engine.
///
/// # Example
///
/// ```
/// use leave_engine::error::EngineError;
///
/// let error = EngineError::BlackoutConflict {
///     periods: vec!["Year-End Closing".to_string(), "Audit Week".to_string()],
/// };
/// assert_eq!(
///     error.to_string(),
///     "Selected dates conflict with blackout periods: Year-End Closing, Audit Week"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or contained inconsistent data.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path (or variable name) that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The tracing subscriber could not be installed.
    #[error("Telemetry error: {message}")]
    Telemetry {
        /// A description of the failure.
        message: String,
    },

    /// Input was malformed and rejected before any side effect.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// The offending field.
        field: String,
        /// What was wrong with it.
        message: String,
    },

    /// The requested dates intersect one or more active blackout periods.
    #[error("Selected dates conflict with blackout periods: {}", periods.join(", "))]
    BlackoutConflict {
        /// Names of every intersecting period.
        periods: Vec<String>,
    },

    /// The requested duration exceeds the remaining ledger days.
    #[error(
        "Insufficient {leave_type} leave balance. Requested: {requested}, Available: {available}"
    )]
    InsufficientBalance {
        /// The leave type being charged.
        leave_type: LeaveType,
        /// Days requested.
        requested: Decimal,
        /// Days remaining on the ledger row.
        available: Decimal,
    },

    /// No leave request exists with the given id.
    #[error("Leave request not found: {request_id}")]
    RequestNotFound {
        /// The missing request id.
        request_id: RequestId,
    },

    /// The caller may not perform the operation.
    #[error("Not authorized: {message}")]
    NotAuthorized {
        /// Why the caller was refused.
        message: String,
    },

    /// The request is not in the state the operation requires.
    #[error("Cannot {action} leave request {request_id} in status {status}")]
    InvalidTransition {
        /// The request id.
        request_id: RequestId,
        /// The status the request was found in.
        status: LeaveStatus,
        /// The attempted action.
        action: LeaveAction,
    },

    /// An unexpected storage failure.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
