//! HTTP API module for the Leave Policy Engine.
//!
//! This module exposes submission, decisions, cancellation, balances and
//! the administrative dashboard over REST. Caller identity arrives as
//! headers set by the upstream identity provider.

mod handlers;
mod identity;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use identity::{Authenticated, EMPLOYEE_ID_HEADER, ROLE_HEADER};
pub use request::{BalanceQuery, DecisionRequest, SubmitLeaveRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
