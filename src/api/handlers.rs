//! HTTP request handlers for the Leave Policy Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};
use chrono::Datelike;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{
    BlackoutPeriod, Dashboard, LeaveBalance, LeaveRequest, LeaveRequestView, LeaveType, RequestId,
};
use crate::store::Page;

use super::identity::Authenticated;
use super::request::{BalanceQuery, DecisionRequest, SubmitLeaveRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/leaves", post(submit_leave))
        .route("/leaves/mine", get(my_leaves))
        .route("/leaves/:id", get(get_leave))
        .route("/leaves/:id/approve", post(approve_leave))
        .route("/leaves/:id/decline", post(decline_leave))
        .route("/leaves/:id/cancel", post(cancel_leave))
        .route("/balances", get(my_balances))
        .route("/balances/:leave_type", get(my_balance))
        .route("/admin/dashboard", get(dashboard))
        .route("/admin/leaves", get(all_leaves))
        .route("/admin/leaves/pending", get(pending_leaves))
        .route("/admin/blackout-periods", get(blackout_periods))
        .with_state(state)
}

/// Logs the outcome of an engine call and converts failures.
fn respond<T>(correlation_id: Uuid, operation: &str, result: EngineResult<T>) -> ApiResult<Json<T>>
where
    T: Serialize,
{
    match result {
        Ok(value) => Ok(Json(value)),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                operation,
                error = %err,
                "Operation rejected"
            );
            Err(err.into())
        }
    }
}

/// Maps a JSON body rejection to an API error.
fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}

/// Parses the optional decision body; an empty body means no remarks.
fn decision_body(correlation_id: Uuid, body: &Bytes) -> ApiResult<DecisionRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(DecisionRequest::default());
    }
    serde_json::from_slice(body).map_err(|err| {
        warn!(correlation_id = %correlation_id, error = %err, "Invalid decision body");
        ApiErrorResponse::bad_request(ApiError::malformed_json(err.to_string()))
    })
}

/// Handler for `POST /leaves`.
async fn submit_leave(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
    payload: Result<Json<SubmitLeaveRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<LeaveRequest>)> {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id = caller.employee_id,
        "Processing leave submission"
    );

    let Json(request) = payload.map_err(|rejection| json_rejection(correlation_id, rejection))?;

    let start_time = Instant::now();
    let result = state
        .engine()
        .submit(request.into_application(caller.employee_id));
    let Json(created) = respond(correlation_id, "submit", result)?;

    info!(
        correlation_id = %correlation_id,
        request_id = created.id,
        duration_days = created.duration,
        duration_us = start_time.elapsed().as_micros(),
        "Leave submission accepted"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler for `GET /leaves/mine`.
async fn my_leaves(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
    Query(page): Query<Page>,
) -> ApiResult<Json<Vec<LeaveRequest>>> {
    let correlation_id = Uuid::new_v4();
    respond(
        correlation_id,
        "requests_for",
        state.engine().requests_for(caller.employee_id, page),
    )
}

/// Handler for `GET /leaves/:id`.
async fn get_leave(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
    Path(request_id): Path<RequestId>,
) -> ApiResult<Json<LeaveRequest>> {
    let correlation_id = Uuid::new_v4();
    respond(
        correlation_id,
        "get_request",
        state.engine().get_request_as(request_id, &caller),
    )
}

/// Handler for `POST /leaves/:id/approve`.
async fn approve_leave(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
    Path(request_id): Path<RequestId>,
    body: Bytes,
) -> ApiResult<Json<LeaveRequest>> {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        request_id,
        approver_id = caller.employee_id,
        "Processing approval"
    );
    let decision = decision_body(correlation_id, &body)?;
    respond(
        correlation_id,
        "approve",
        state.engine().approve(request_id, &caller, decision.remarks),
    )
}

/// Handler for `POST /leaves/:id/decline`.
async fn decline_leave(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
    Path(request_id): Path<RequestId>,
    body: Bytes,
) -> ApiResult<Json<LeaveRequest>> {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        request_id,
        approver_id = caller.employee_id,
        "Processing decline"
    );
    let decision = decision_body(correlation_id, &body)?;
    respond(
        correlation_id,
        "decline",
        state.engine().decline(request_id, &caller, decision.remarks),
    )
}

/// Handler for `POST /leaves/:id/cancel`.
async fn cancel_leave(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
    Path(request_id): Path<RequestId>,
) -> ApiResult<Json<LeaveRequest>> {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        request_id,
        employee_id = caller.employee_id,
        "Processing cancellation"
    );
    respond(
        correlation_id,
        "cancel",
        state.engine().cancel(request_id, caller.employee_id),
    )
}

/// Handler for `GET /balances`.
async fn my_balances(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
    Query(query): Query<BalanceQuery>,
) -> ApiResult<Json<Vec<LeaveBalance>>> {
    let correlation_id = Uuid::new_v4();
    let engine = state.engine();
    let year = query.year.unwrap_or_else(|| engine.today().year());
    respond(
        correlation_id,
        "balances",
        engine.balances(caller.employee_id, year),
    )
}

/// Handler for `GET /balances/:leave_type`.
async fn my_balance(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
    Path(leave_type): Path<String>,
    Query(query): Query<BalanceQuery>,
) -> ApiResult<Json<LeaveBalance>> {
    let correlation_id = Uuid::new_v4();
    let engine = state.engine();
    let year = query.year.unwrap_or_else(|| engine.today().year());
    let result = leave_type
        .parse::<LeaveType>()
        .and_then(|leave_type| engine.balance(caller.employee_id, leave_type, year));
    respond(correlation_id, "balance", result)
}

/// Handler for `GET /admin/dashboard`.
async fn dashboard(
    State(state): State<AppState>,
    caller: Authenticated,
) -> ApiResult<Json<Dashboard>> {
    caller.require_admin()?;
    let correlation_id = Uuid::new_v4();
    let start_time = Instant::now();
    let Json(dashboard) = respond(correlation_id, "dashboard", state.engine().dashboard())?;
    info!(
        correlation_id = %correlation_id,
        pending_approvals = dashboard.stats.pending_approvals,
        on_leave_today = dashboard.stats.on_leave_today,
        duration_us = start_time.elapsed().as_micros(),
        "Dashboard computed"
    );
    Ok(Json(dashboard))
}

/// Handler for `GET /admin/leaves`.
async fn all_leaves(
    State(state): State<AppState>,
    caller: Authenticated,
    Query(page): Query<Page>,
) -> ApiResult<Json<Vec<LeaveRequestView>>> {
    caller.require_admin()?;
    respond(Uuid::new_v4(), "all_requests", state.engine().all_requests(page))
}

/// Handler for `GET /admin/leaves/pending`.
async fn pending_leaves(
    State(state): State<AppState>,
    caller: Authenticated,
    Query(page): Query<Page>,
) -> ApiResult<Json<Vec<LeaveRequestView>>> {
    caller.require_admin()?;
    respond(
        Uuid::new_v4(),
        "pending_requests",
        state.engine().pending_requests(page),
    )
}

/// Handler for `GET /admin/blackout-periods`.
async fn blackout_periods(
    State(state): State<AppState>,
    caller: Authenticated,
) -> ApiResult<Json<Vec<BlackoutPeriod>>> {
    caller.require_admin()?;
    Ok(Json(state.engine().blackout_periods()))
}
