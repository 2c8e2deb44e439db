//! Caller identity extraction.
//!
//! The identity provider sits in front of this service and forwards the
//! authenticated caller as `x-employee-id` and `x-role` headers.

use axum::{async_trait, extract::FromRequestParts, http::HeaderMap, http::request::Parts};

use crate::error::EngineError;
use crate::models::{Caller, EmployeeId, Role};

use super::response::ApiErrorResponse;

/// Header carrying the caller's employee id.
pub const EMPLOYEE_ID_HEADER: &str = "x-employee-id";

/// Header carrying the caller's role (`admin` or `employee`).
pub const ROLE_HEADER: &str = "x-role";

/// The authenticated caller of an HTTP request.
#[derive(Debug, Clone, Copy)]
pub struct Authenticated(pub Caller);

impl Authenticated {
    /// Fails with `NotAuthorized` unless the caller is an administrator.
    pub fn require_admin(&self) -> Result<(), ApiErrorResponse> {
        if self.0.is_admin() {
            Ok(())
        } else {
            Err(EngineError::NotAuthorized {
                message: "administrator role required".to_string(),
            }
            .into())
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = ApiErrorResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        caller_from_headers(&parts.headers).map(Authenticated)
    }
}

fn caller_from_headers(headers: &HeaderMap) -> Result<Caller, ApiErrorResponse> {
    let employee_id = headers
        .get(EMPLOYEE_ID_HEADER)
        .ok_or_else(|| ApiErrorResponse::unauthenticated("Missing x-employee-id header"))?
        .to_str()
        .ok()
        .and_then(|value| value.trim().parse::<EmployeeId>().ok())
        .ok_or_else(|| ApiErrorResponse::unauthenticated("Invalid x-employee-id header"))?;

    let role = match headers.get(ROLE_HEADER) {
        None => Role::Employee,
        Some(value) => match value.to_str().map(|v| v.trim().to_ascii_lowercase()) {
            Ok(role) if role == "admin" => Role::Admin,
            Ok(role) if role == "employee" => Role::Employee,
            _ => return Err(ApiErrorResponse::unauthenticated("Invalid x-role header")),
        },
    };

    Ok(Caller { employee_id, role })
}
