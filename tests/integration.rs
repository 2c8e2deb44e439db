//! End-to-end HTTP tests for the Leave Policy Engine.
//!
//! This test suite drives the full router against the default policy
//! directory and covers:
//! - Submission, approval and cancellation with ledger effects
//! - Blackout conflicts
//! - Balance checks at submission and approval
//! - Authorization of admin and owner-only operations
//! - Listings and the dashboard
//! - Error cases

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use serde_json::{Value, json};
use tower::ServiceExt;

use leave_engine::api::{AppState, create_router};
use leave_engine::clock::FixedClock;
use leave_engine::config::ConfigLoader;
use leave_engine::policy::LeavePolicyEngine;

// =============================================================================
// Test Helpers
// =============================================================================

const EMPLOYEE: &str = "1001";
const COLLEAGUE: &str = "1002";
const ADMIN: &str = "9001";

fn create_router_on(today: NaiveDate) -> Router {
    let loader = ConfigLoader::load("./config/default").expect("Failed to load config");
    let engine = LeavePolicyEngine::from_loader(&loader, Arc::new(FixedClock::on(today)))
        .expect("Failed to build engine");
    create_router(AppState::new(engine))
}

fn create_router_for_test() -> Router {
    create_router_on(date("2025-03-01"))
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

fn as_caller(builder: axum::http::request::Builder, employee_id: &str) -> axum::http::request::Builder {
    let role = if employee_id == ADMIN { "admin" } else { "employee" };
    builder
        .header("x-employee-id", employee_id)
        .header("x-role", role)
}

async fn post_json(router: &Router, uri: &str, caller: &str, body: Value) -> (StatusCode, Value) {
    let request = as_caller(Request::builder().method("POST").uri(uri), caller)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}

async fn post_empty(router: &Router, uri: &str, caller: &str) -> (StatusCode, Value) {
    let request = as_caller(Request::builder().method("POST").uri(uri), caller)
        .body(Body::empty())
        .unwrap();
    send(router, request).await
}

async fn get(router: &Router, uri: &str, caller: &str) -> (StatusCode, Value) {
    let request = as_caller(Request::builder().uri(uri), caller)
        .body(Body::empty())
        .unwrap();
    send(router, request).await
}

async fn submit(
    router: &Router,
    caller: &str,
    leave_type: &str,
    start: &str,
    end: &str,
) -> (StatusCode, Value) {
    post_json(
        router,
        "/leaves",
        caller,
        json!({
            "leave_type": leave_type,
            "start_date": start,
            "end_date": end,
            "reason": "Planned time off"
        }),
    )
    .await
}

fn id_of(value: &Value) -> u64 {
    value["id"].as_u64().expect("response has an id")
}

fn assert_balance(value: &Value, used: &str, remaining: &str) {
    assert_eq!(value["used_days"], used, "used_days in {}", value);
    assert_eq!(value["remaining_days"], remaining, "remaining_days in {}", value);
}

// =============================================================================
// SECTION 1: Lifecycle scenarios
// =============================================================================

#[tokio::test]
async fn test_submit_approve_then_cancel_fails() {
    let router = create_router_for_test();

    let (status, balance) = get(&router, "/balances/vacation?year=2025", EMPLOYEE).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(balance["total_days"], "15");
    assert_balance(&balance, "0", "15");

    let (status, created) = submit(&router, EMPLOYEE, "vacation", "2025-03-10", "2025-03-12").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "pending");
    assert_eq!(created["duration"], 3);
    let id = id_of(&created);

    let (status, approved) = post_json(
        &router,
        &format!("/leaves/{}/approve", id),
        ADMIN,
        json!({ "remarks": "Enjoy" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved["status"], "approved");
    assert_eq!(approved["approved_by"], 9001);
    assert_eq!(approved["remarks"], "Enjoy");
    assert!(approved["approved_at"].is_string());

    let (_, balance) = get(&router, "/balances/vacation?year=2025", EMPLOYEE).await;
    assert_balance(&balance, "3", "12");

    let (status, error) = post_empty(&router, &format!("/leaves/{}/cancel", id), EMPLOYEE).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "INVALID_TRANSITION");

    let (_, balance) = get(&router, "/balances/vacation?year=2025", EMPLOYEE).await;
    assert_balance(&balance, "3", "12");
}

#[tokio::test]
async fn test_second_approval_is_invalid_transition() {
    let router = create_router_for_test();
    let (_, created) = submit(&router, EMPLOYEE, "sick", "2025-04-01", "2025-04-02").await;
    let uri = format!("/leaves/{}/approve", id_of(&created));

    let (status, _) = post_empty(&router, &uri, ADMIN).await;
    assert_eq!(status, StatusCode::OK);

    let (status, error) = post_empty(&router, &uri, ADMIN).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "INVALID_TRANSITION");

    let (_, balance) = get(&router, "/balances/sick?year=2025", EMPLOYEE).await;
    assert_balance(&balance, "2", "8");
}

#[tokio::test]
async fn test_decline_leaves_balance_untouched() {
    let router = create_router_for_test();
    let (_, created) = submit(&router, EMPLOYEE, "vacation", "2025-05-05", "2025-05-09").await;

    let (status, declined) = post_json(
        &router,
        &format!("/leaves/{}/decline", id_of(&created)),
        ADMIN,
        json!({ "remarks": "Release week" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(declined["status"], "declined");
    assert_eq!(declined["remarks"], "Release week");

    let (_, balance) = get(&router, "/balances/vacation?year=2025", EMPLOYEE).await;
    assert_balance(&balance, "0", "15");
}

#[tokio::test]
async fn test_cancel_pending_request() {
    let router = create_router_for_test();
    let (_, created) = submit(&router, EMPLOYEE, "personal", "2025-04-14", "2025-04-14").await;
    let uri = format!("/leaves/{}/cancel", id_of(&created));

    let (status, error) = post_empty(&router, &uri, COLLEAGUE).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["code"], "NOT_AUTHORIZED");

    let (status, cancelled) = post_empty(&router, &uri, EMPLOYEE).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "cancelled");
}

// =============================================================================
// SECTION 2: Blackout calendar
// =============================================================================

#[tokio::test]
async fn test_year_end_closing_blocks_submission() {
    let router = create_router_for_test();

    let (status, error) = submit(&router, EMPLOYEE, "vacation", "2025-12-31", "2026-01-01").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "BLACKOUT_CONFLICT");
    assert!(error["message"].as_str().unwrap().contains("Year-End Closing"));
    assert_eq!(error["details"], "Year-End Closing");

    let (status, created) = submit(&router, EMPLOYEE, "vacation", "2025-12-20", "2025-12-24").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["duration"], 5);
}

#[tokio::test]
async fn test_restricted_blackout_also_blocks() {
    let router = create_router_for_test();
    let (status, error) = submit(&router, EMPLOYEE, "personal", "2025-03-31", "2025-04-01").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["details"], "Quarter Close");
}

#[tokio::test]
async fn test_inactive_blackout_does_not_block() {
    let router = create_router_for_test();
    let (status, _) = submit(&router, EMPLOYEE, "vacation", "2025-08-01", "2025-08-05").await;
    assert_eq!(status, StatusCode::CREATED);
}

// =============================================================================
// SECTION 3: Balance checks
// =============================================================================

#[tokio::test]
async fn test_submission_balance_boundary() {
    let router = create_router_for_test();

    let (status, error) = submit(&router, EMPLOYEE, "emergency", "2025-04-07", "2025-04-12").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["code"], "INSUFFICIENT_BALANCE");
    assert_eq!(error["details"], "requested=6 available=5");

    let (status, _) = submit(&router, EMPLOYEE, "emergency", "2025-04-07", "2025-04-11").await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_approval_fails_when_balance_was_consumed() {
    let router = create_router_for_test();
    let (_, first) = submit(&router, EMPLOYEE, "personal", "2025-04-07", "2025-04-10").await;
    let (_, second) = submit(&router, EMPLOYEE, "personal", "2025-05-05", "2025-05-07").await;

    let (status, _) = post_empty(&router, &format!("/leaves/{}/approve", id_of(&first)), ADMIN).await;
    assert_eq!(status, StatusCode::OK);

    let second_uri = format!("/leaves/{}", id_of(&second));
    let (status, error) = post_empty(&router, &format!("{}/approve", second_uri), ADMIN).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["code"], "INSUFFICIENT_BALANCE");

    let (_, still_pending) = get(&router, &second_uri, EMPLOYEE).await;
    assert_eq!(still_pending["status"], "pending");
}

#[tokio::test]
async fn test_balances_lists_tracked_types() {
    let router = create_router_for_test();
    let (status, balances) = get(&router, "/balances", EMPLOYEE).await;
    assert_eq!(status, StatusCode::OK);

    let types: Vec<&str> = balances
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["leave_type"].as_str().unwrap())
        .collect();
    assert_eq!(types, vec!["vacation", "sick", "personal", "emergency"]);
    assert!(balances.as_array().unwrap().iter().all(|b| b["year"] == 2025));
}

#[tokio::test]
async fn test_official_business_is_not_tracked() {
    let router = create_router_for_test();
    let (status, created) = submit(&router, EMPLOYEE, "official_business", "2025-04-01", "2025-04-25").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = post_empty(&router, &format!("/leaves/{}/approve", id_of(&created)), ADMIN).await;
    assert_eq!(status, StatusCode::OK);

    let (status, error) = get(&router, "/balances/official_business", EMPLOYEE).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

// =============================================================================
// SECTION 4: Authorization
// =============================================================================

#[tokio::test]
async fn test_employee_cannot_approve() {
    let router = create_router_for_test();
    let (_, created) = submit(&router, EMPLOYEE, "vacation", "2025-04-01", "2025-04-02").await;

    let (status, error) = post_empty(&router, &format!("/leaves/{}/approve", id_of(&created)), EMPLOYEE).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["code"], "NOT_AUTHORIZED");
}

#[tokio::test]
async fn test_request_visible_to_owner_and_admin_only() {
    let router = create_router_for_test();
    let (_, created) = submit(&router, EMPLOYEE, "vacation", "2025-04-01", "2025-04-02").await;
    let uri = format!("/leaves/{}", id_of(&created));

    assert_eq!(get(&router, &uri, EMPLOYEE).await.0, StatusCode::OK);
    assert_eq!(get(&router, &uri, ADMIN).await.0, StatusCode::OK);
    assert_eq!(get(&router, &uri, COLLEAGUE).await.0, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_routes_reject_employees() {
    let router = create_router_for_test();
    for uri in [
        "/admin/dashboard",
        "/admin/leaves",
        "/admin/leaves/pending",
        "/admin/blackout-periods",
    ] {
        let (status, error) = get(&router, uri, EMPLOYEE).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{}", uri);
        assert_eq!(error["code"], "NOT_AUTHORIZED");
    }
}

// =============================================================================
// SECTION 5: Listings and dashboard
// =============================================================================

#[tokio::test]
async fn test_my_leaves_newest_first_with_paging() {
    let router = create_router_for_test();
    let (_, first) = submit(&router, EMPLOYEE, "vacation", "2025-04-01", "2025-04-01").await;
    let (_, second) = submit(&router, EMPLOYEE, "vacation", "2025-04-02", "2025-04-02").await;
    submit(&router, COLLEAGUE, "vacation", "2025-04-03", "2025-04-03").await;

    let (status, mine) = get(&router, "/leaves/mine", EMPLOYEE).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<u64> = mine.as_array().unwrap().iter().map(id_of).collect();
    assert_eq!(ids, vec![id_of(&second), id_of(&first)]);

    let (_, page) = get(&router, "/leaves/mine?skip=1&limit=1", EMPLOYEE).await;
    let ids: Vec<u64> = page.as_array().unwrap().iter().map(id_of).collect();
    assert_eq!(ids, vec![id_of(&first)]);
}

#[tokio::test]
async fn test_pending_listing_is_enriched() {
    let router = create_router_for_test();
    submit(&router, EMPLOYEE, "vacation", "2025-04-01", "2025-04-01").await;

    let (status, pending) = get(&router, "/admin/leaves/pending", ADMIN).await;
    assert_eq!(status, StatusCode::OK);
    let entry = &pending.as_array().unwrap()[0];
    assert_eq!(entry["employee_name"], "Maria Santos");
    assert_eq!(entry["employee_department"], "Engineering");
    assert_eq!(entry["employee_code"], "EMP-1001");
    assert_eq!(entry["status"], "pending");
}

#[tokio::test]
async fn test_dashboard_counters() {
    let router = create_router_on(date("2025-04-02"));

    let (_, on_leave) = submit(&router, EMPLOYEE, "vacation", "2025-04-01", "2025-04-03").await;
    post_empty(&router, &format!("/leaves/{}/approve", id_of(&on_leave)), ADMIN).await;
    let (_, later) = submit(&router, COLLEAGUE, "sick", "2025-05-20", "2025-05-21").await;
    post_empty(&router, &format!("/leaves/{}/approve", id_of(&later)), ADMIN).await;
    submit(&router, COLLEAGUE, "personal", "2025-04-21", "2025-04-21").await;

    let (status, dashboard) = get(&router, "/admin/dashboard", ADMIN).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard["as_of"], "2025-04-02");
    assert_eq!(dashboard["pending_approvals"], 1);
    assert_eq!(dashboard["on_leave_today"], 1);
    assert_eq!(dashboard["upcoming_expirations"], 1);
    assert_eq!(dashboard["policy_violations"], 0);
    assert_eq!(dashboard["requests"].as_array().unwrap().len(), 3);
    assert_eq!(dashboard["leave_types"].as_array().unwrap().len(), 5);
    assert_eq!(dashboard["blackout_periods"][0]["name"], "Quarter Close");
}

#[tokio::test]
async fn test_blackout_periods_sorted_by_start() {
    let router = create_router_for_test();
    let (status, periods) = get(&router, "/admin/blackout-periods", ADMIN).await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<&str> = periods
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "Quarter Close",
            "Annual Inventory",
            "Office Relocation",
            "Year-End Closing"
        ]
    );
    assert_eq!(periods[3]["restriction_level"], "no-leave");
}

// =============================================================================
// SECTION 6: Error cases
// =============================================================================

#[tokio::test]
async fn test_reversed_dates_return_400() {
    let router = create_router_for_test();
    let (status, error) = submit(&router, EMPLOYEE, "vacation", "2025-04-03", "2025-04-01").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_blank_reason_returns_400() {
    let router = create_router_for_test();
    let (status, error) = post_json(
        &router,
        "/leaves",
        EMPLOYEE,
        json!({
            "leave_type": "vacation",
            "start_date": "2025-04-01",
            "end_date": "2025-04-01",
            "reason": ""
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unknown_leave_type_returns_400() {
    let router = create_router_for_test();
    let (status, error) = submit(&router, EMPLOYEE, "sabbatical", "2025-04-01", "2025-04-01").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_unknown_request_returns_404() {
    let router = create_router_for_test();
    let (status, error) = post_empty(&router, "/leaves/999/approve", ADMIN).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_missing_identity_returns_401() {
    let router = create_router_for_test();
    let request = Request::builder()
        .method("POST")
        .uri("/leaves")
        .header("Content-Type", "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let (status, error) = send(&router, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error["code"], "UNAUTHENTICATED");
}
