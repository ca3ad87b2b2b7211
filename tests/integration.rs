//! End-to-end tests for the labor engine HTTP API.
//!
//! This suite drives the router the way the web front end does:
//! - Schedule assignment and confirmation (single and batch)
//! - Payroll generation, deduction toggling and finalization
//! - Role scoping for supervisors, workers and clients
//! - Invoice issuing, the overdue sweep and payment posting
//! - Worker payments, liquidation and reactivation
//! - Error cases

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tower::ServiceExt;

use labor_engine::api::{AppState, create_router};
use labor_engine::audit::MemoryActivityLog;
use labor_engine::config::FinancialPolicy;
use labor_engine::ledger::Ledger;
use labor_engine::models::{BudgetLine, ProjectBudget, Role, Worker};
use labor_engine::store::{LedgerStore, MemoryStore, Transactional};

// =============================================================================
// Test Helpers
// =============================================================================

const ADMIN: (u64, &str) = (1, "admin");
const SUPERVISOR: (u64, &str) = (2, "supervisor");
const WORKER: (u64, &str) = (10, "worker");
const OTHER_WORKER: (u64, &str) = (11, "worker");
const CLIENT: (u64, &str) = (30, "client");
const PROJECT: u64 = 100;
const OTHER_PROJECT: u64 = 200;

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Reads a decimal whether it was serialized as a string or a number.
fn dec_field(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).unwrap(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).unwrap(),
        other => panic!("Expected a decimal, got {:?}", other),
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 5, 10).unwrap()
}

fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    store
        .transaction(|tx| {
            tx.save_worker(Worker::new(1, "Admin", Role::Admin))?;

            let mut supervisor = Worker::new(2, "Sofia Campos", Role::Supervisor);
            supervisor.hourly_rate = Some(decimal("6000"));
            tx.save_worker(supervisor)?;

            let mut worker = Worker::new(10, "Carlos Rojas", Role::Worker);
            worker.hourly_rate = Some(decimal("5000"));
            worker.monthly_salary = Some(decimal("300000"));
            worker.start_date = NaiveDate::from_ymd_opt(2025, 1, 1);
            tx.save_worker(worker)?;

            let mut other = Worker::new(11, "Luis Vega", Role::Worker);
            other.hourly_rate = Some(decimal("4000"));
            tx.save_worker(other)?;

            tx.save_worker(Worker::new(30, "Constructora Norte", Role::Client))?;
            tx.assign_project(2, PROJECT)?;
            tx.assign_project(30, PROJECT)?;

            let budget = tx.insert_budget(ProjectBudget::new(0, PROJECT))?;
            tx.insert_budget_line(BudgetLine {
                id: 0,
                budget_id: budget.id,
                name: "Obra gris".to_string(),
                subtotal: decimal("1000000"),
                tax_percentage: decimal("13"),
            })?;

            let other_budget = tx.insert_budget(ProjectBudget::new(0, OTHER_PROJECT))?;
            tx.insert_budget_line(BudgetLine {
                id: 0,
                budget_id: other_budget.id,
                name: "Acabados".to_string(),
                subtotal: decimal("500000"),
                tax_percentage: decimal("13"),
            })?;
            Ok(())
        })
        .expect("Failed to seed store");
    store
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn create_test_state() -> AppState {
    let ledger = Ledger::new(
        seeded_store(),
        FinancialPolicy::default(),
        Arc::new(MemoryActivityLog::new()),
    );
    AppState::new(ledger).with_fixed_date(today())
}

async fn send(
    router: &Router,
    caller: (u64, &str),
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-user-id", caller.0.to_string())
        .header("x-user-role", caller.1);
    let body = match body {
        Some(body) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(body.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    (status, json)
}

async fn assign(router: &Router, worker_id: u64, project_id: u64, date: &str) -> u64 {
    let (status, body) = send(
        router,
        ADMIN,
        "POST",
        "/schedules",
        Some(json!({ "project_id": project_id, "worker_id": worker_id, "date": date })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "assign failed: {}", body);
    body["id"].as_u64().unwrap()
}

async fn confirm(router: &Router, caller: (u64, &str), entry_id: u64, hours: &str) -> StatusCode {
    let (status, _) = send(
        router,
        caller,
        "POST",
        &format!("/schedules/{}/confirm", entry_id),
        Some(json!({ "hours": hours, "overtime": "0" })),
    )
    .await;
    status
}

async fn generate(router: &Router, start: &str, end: &str) -> (StatusCode, Value) {
    send(
        router,
        ADMIN,
        "POST",
        "/payroll/generate",
        Some(json!({ "start_date": start, "end_date": end })),
    )
    .await
}

fn entry_for(summary: &Value, worker_id: u64) -> Value {
    summary["entries"]
        .as_array()
        .unwrap()
        .iter()
        .find(|entry| entry["worker_id"].as_u64() == Some(worker_id))
        .cloned()
        .unwrap_or_else(|| panic!("No entry for worker {} in {}", worker_id, summary))
}

// =============================================================================
// Payroll
// =============================================================================

#[tokio::test]
async fn test_confirmed_hours_become_payroll_entry() {
    let router = create_router_for_test();
    let entry_id = assign(&router, 10, PROJECT, "2026-05-04").await;
    assert_eq!(confirm(&router, SUPERVISOR, entry_id, "12").await, StatusCode::OK);

    let (status, summary) = generate(&router, "2026-05-01", "2026-05-15").await;

    assert_eq!(status, StatusCode::CREATED);
    let entry = entry_for(&summary, 10);
    // 12h × 5000 = 60000; charges 60000 × 9.17% = 5502 → 5500
    assert_eq!(dec_field(&entry["gross_salary"]), decimal("60000"));
    assert_eq!(dec_field(&entry["social_charges"]), decimal("5500"));
    assert_eq!(dec_field(&entry["net_salary"]), decimal("54500"));
    assert_eq!(summary["period"]["status"], "draft");
}

#[tokio::test]
async fn test_unconfirmed_entries_are_not_paid() {
    let router = create_router_for_test();
    assign(&router, 10, PROJECT, "2026-05-04").await;

    let (status, summary) = generate(&router, "2026-05-01", "2026-05-15").await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(summary["entries"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_toggle_deductions_recomputes_net() {
    let router = create_router_for_test();
    let entry_id = assign(&router, 10, PROJECT, "2026-05-04").await;
    confirm(&router, ADMIN, entry_id, "12").await;
    let (_, summary) = generate(&router, "2026-05-01", "2026-05-15").await;
    let payroll_entry_id = entry_for(&summary, 10)["id"].as_u64().unwrap();

    let (status, entry) = send(
        &router,
        ADMIN,
        "POST",
        &format!("/payroll/entries/{}/deductions", payroll_entry_id),
        Some(json!({ "apply": false })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(dec_field(&entry["social_charges"]), Decimal::ZERO);
    assert_eq!(dec_field(&entry["net_salary"]), decimal("60000"));
}

#[tokio::test]
async fn test_overlapping_period_is_rejected() {
    let router = create_router_for_test();
    let (status, _) = generate(&router, "2026-05-01", "2026-05-15").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = generate(&router, "2026-05-10", "2026-05-31").await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INVALID_STATE");
}

#[tokio::test]
async fn test_final_period_locks_confirmations() {
    let router = create_router_for_test();
    let entry_id = assign(&router, 10, PROJECT, "2026-05-04").await;
    confirm(&router, ADMIN, entry_id, "12").await;
    let (_, summary) = generate(&router, "2026-05-01", "2026-05-15").await;
    let period_id = summary["period"]["id"].as_u64().unwrap();

    let (status, period) = send(
        &router,
        ADMIN,
        "POST",
        &format!("/payroll/periods/{}/confirm", period_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(period["status"], "final");

    let (status, entry) = send(
        &router,
        ADMIN,
        "POST",
        &format!("/schedules/{}/confirm", entry_id),
        Some(json!({ "hours": "4" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dec_field(&entry["hours_worked"]), decimal("12"));
}

#[tokio::test]
async fn test_worker_sees_only_own_entry() {
    let router = create_router_for_test();
    for worker_id in [10, 11] {
        let entry_id = assign(&router, worker_id, PROJECT, "2026-05-04").await;
        confirm(&router, ADMIN, entry_id, "8").await;
    }
    let (_, summary) = generate(&router, "2026-05-01", "2026-05-15").await;
    let period_id = summary["period"]["id"].as_u64().unwrap();
    assert_eq!(summary["entries"].as_array().unwrap().len(), 2);

    let (status, own) = send(
        &router,
        WORKER,
        "GET",
        &format!("/payroll/periods/{}", period_id),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let entries = own["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["worker_id"], 10);
}

#[tokio::test]
async fn test_delete_period_then_regenerate() {
    let router = create_router_for_test();
    let (_, summary) = generate(&router, "2026-05-01", "2026-05-15").await;
    let period_id = summary["period"]["id"].as_u64().unwrap();

    let (status, _) = send(
        &router,
        ADMIN,
        "DELETE",
        &format!("/payroll/periods/{}", period_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = generate(&router, "2026-05-01", "2026-05-15").await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, periods) = send(&router, ADMIN, "GET", "/payroll/periods", None).await;
    assert_eq!(periods.as_array().unwrap().len(), 1);
}

// =============================================================================
// Schedule access
// =============================================================================

#[tokio::test]
async fn test_supervisor_scope_on_confirmation() {
    let router = create_router_for_test();
    let own = assign(&router, 2, PROJECT, "2026-05-04").await;
    let elsewhere = assign(&router, 10, OTHER_PROJECT, "2026-05-04").await;

    assert_eq!(confirm(&router, SUPERVISOR, own, "8").await, StatusCode::FORBIDDEN);
    assert_eq!(
        confirm(&router, SUPERVISOR, elsewhere, "8").await,
        StatusCode::FORBIDDEN
    );
    assert_eq!(confirm(&router, WORKER, elsewhere, "8").await, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_batch_confirm_counts_updated_entries() {
    let router = create_router_for_test();
    let first = assign(&router, 10, PROJECT, "2026-05-04").await;
    let second = assign(&router, 11, PROJECT, "2026-05-04").await;
    let elsewhere = assign(&router, 10, OTHER_PROJECT, "2026-05-05").await;

    let (status, body) = send(
        &router,
        SUPERVISOR,
        "POST",
        "/schedules/confirm-batch",
        Some(json!({
            "items": [
                { "entry_id": first, "hours": "9" },
                { "entry_id": second },
                { "entry_id": elsewhere, "hours": "8" },
                { "entry_id": 999 }
            ]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updated"], 2);
}

#[tokio::test]
async fn test_approval_queue_for_supervisor() {
    let router = create_router_for_test();
    assign(&router, 10, PROJECT, "2026-05-04").await;
    assign(&router, 2, PROJECT, "2026-05-04").await;
    assign(&router, 11, OTHER_PROJECT, "2026-05-04").await;

    let (status, queue) = send(
        &router,
        SUPERVISOR,
        "GET",
        "/schedules/approval?date=2026-05-04",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let queue = queue.as_array().unwrap();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0]["worker_id"], 10);

    let (status, _) = send(
        &router,
        SUPERVISOR,
        "GET",
        &format!("/schedules/approval?date=2026-05-04&project_id={}", OTHER_PROJECT),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_worker_calendar_shows_own_entries() {
    let router = create_router_for_test();
    assign(&router, 10, PROJECT, "2026-05-04").await;
    assign(&router, 11, PROJECT, "2026-05-05").await;

    let (status, calendar) = send(
        &router,
        OTHER_WORKER,
        "GET",
        "/schedules/calendar?start=2026-05-01&end=2026-05-31",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let calendar = calendar.as_array().unwrap();
    assert_eq!(calendar.len(), 1);
    assert_eq!(calendar[0]["worker_id"], 11);
}

// =============================================================================
// Invoices and finance
// =============================================================================

async fn issue_invoice(router: &Router, number: &str, issue: &str, due: &str) -> Value {
    let (status, invoice) = send(
        router,
        ADMIN,
        "POST",
        "/budgets/1/invoices",
        Some(json!({
            "budget_line_id": 1,
            "invoice_number": number,
            "issue_date": issue,
            "due_date": due,
            "amount": "200000"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "issue failed: {}", invoice);
    invoice
}

#[tokio::test]
async fn test_overdue_sweep_on_budget_read() {
    let router = create_router_for_test();
    let invoice = issue_invoice(&router, "F-001", "2026-04-01", "2026-04-30").await;
    assert_eq!(invoice["status"], "pending");
    issue_invoice(&router, "F-002", "2026-05-01", "2026-05-31").await;

    let (status, budget) = send(&router, ADMIN, "GET", "/budgets/1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(dec_field(&budget["adjudicated"]), decimal("1130000"));
    assert_eq!(dec_field(&budget["invoiced"]), decimal("400000"));
    assert_eq!(dec_field(&budget["balance"]), decimal("730000"));
    let invoices = budget["invoices"].as_array().unwrap();
    // Newest issue date first
    assert_eq!(invoices[0]["invoice"]["invoice_number"], "F-002");
    assert_eq!(invoices[0]["invoice"]["status"], "pending");
    assert_eq!(invoices[1]["invoice"]["status"], "overdue");
}

#[tokio::test]
async fn test_full_payment_settles_overdue_invoice() {
    let router = create_router_for_test();
    let invoice = issue_invoice(&router, "F-001", "2026-04-01", "2026-04-30").await;
    let invoice_id = invoice["id"].as_u64().unwrap();
    send(&router, ADMIN, "GET", "/budgets/1", None).await;

    let (status, view) = send(
        &router,
        ADMIN,
        "POST",
        &format!("/invoices/{}/pay", invoice_id),
        Some(json!({
            "payment_date": "2026-05-08",
            "deposit_number": "DEP-778",
            "amount": "200000",
            "payment_type": "full"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["invoice"]["status"], "paid");
    assert_eq!(view["payment"]["deposit_number"], "DEP-778");

    let (_, dashboard) = send(&router, ADMIN, "GET", "/finance/dashboard", None).await;
    assert!(dashboard["invoices"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_invoice_with_foreign_budget_line_is_rejected() {
    let router = create_router_for_test();

    let (status, body) = send(
        &router,
        ADMIN,
        "POST",
        "/budgets/1/invoices",
        Some(json!({
            "budget_line_id": 2,
            "invoice_number": "F-009",
            "issue_date": "2026-04-01",
            "due_date": "2026-04-30",
            "amount": "1000"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_client_finance_scope() {
    let router = create_router_for_test();
    issue_invoice(&router, "F-001", "2026-04-01", "2026-04-30").await;

    let (status, dashboard) = send(&router, CLIENT, "GET", "/finance/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard["budgets"], 1);
    assert_eq!(dec_field(&dashboard["total_adjudicated"]), decimal("1130000"));

    let (status, _) = send(&router, CLIENT, "GET", "/budgets/2", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &router,
        CLIENT,
        "POST",
        "/payroll/generate",
        Some(json!({ "start_date": "2026-05-01", "end_date": "2026-05-15" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_dashboard_filter_by_status() {
    let router = create_router_for_test();
    issue_invoice(&router, "F-001", "2026-04-01", "2026-04-30").await;
    issue_invoice(&router, "F-002", "2026-05-01", "2026-05-31").await;

    let (status, dashboard) = send(
        &router,
        ADMIN,
        "GET",
        "/finance/dashboard?status=overdue",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let invoices = dashboard["invoices"].as_array().unwrap();
    assert_eq!(invoices.len(), 1);
    assert_eq!(invoices[0]["invoice_number"], "F-001");
    assert_eq!(dec_field(&dashboard["total_invoiced"]), decimal("200000"));
}

// =============================================================================
// Worker payments and liquidation
// =============================================================================

#[tokio::test]
async fn test_liquidation_lifecycle() {
    let router = create_router_for_test();
    let (status, _) = send(
        &router,
        ADMIN,
        "POST",
        "/workers/10/payments",
        Some(json!({ "date": "2026-04-30", "amount": "300000", "hours_paid": "240" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, preview) = send(
        &router,
        ADMIN,
        "GET",
        "/workers/10/liquidation/preview?date=2026-05-10",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // 10 unpaid days × 8 h × 5000
    assert_eq!(dec_field(&preview["salary_due"]), decimal("400000"));
    let total = dec_field(&preview["total"]);
    // vacation and aguinaldo over 494 days, rounded with salary_due as one sum
    assert_eq!(total, decimal("968002.63"));

    let amounts = json!({
        "vacation_days": preview["vacation_days"],
        "vacation_amount": preview["vacation_amount"],
        "aguinaldo_amount": preview["aguinaldo_amount"],
        "salary_due": preview["salary_due"],
        "total": preview["total"]
    });
    let (status, record) = send(
        &router,
        ADMIN,
        "POST",
        "/workers/10/liquidations",
        Some(json!({ "date": "2026-05-10", "amounts": amounts.clone() })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(dec_field(&record["total_amount"]), total);

    let (status, _) = send(
        &router,
        ADMIN,
        "POST",
        "/workers/10/liquidations",
        Some(json!({ "date": "2026-05-10", "amounts": amounts })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, worker) = send(&router, ADMIN, "POST", "/workers/10/reactivate", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(worker["start_date"], "2026-05-10");
    assert_eq!(worker["status"], "active");

    let (status, history) = send(&router, WORKER, "GET", "/workers/10/liquidations", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_payment_history_is_owner_only() {
    let router = create_router_for_test();
    send(
        &router,
        ADMIN,
        "POST",
        "/workers/10/payments",
        Some(json!({ "date": "2026-04-30", "amount": "300000", "hours_paid": "240" })),
    )
    .await;

    let (status, history) = send(&router, WORKER, "GET", "/workers/10/payments", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history.as_array().unwrap().len(), 1);

    let (status, _) = send(&router, OTHER_WORKER, "GET", "/workers/10/payments", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_liquidation_preview_unknown_worker() {
    let router = create_router_for_test();
    let (status, body) = send(
        &router,
        ADMIN,
        "GET",
        "/workers/404/liquidation/preview",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

// =============================================================================
// Activity log
// =============================================================================

#[tokio::test]
async fn test_activity_log_lists_committed_writes_for_admin() {
    let router = create_router_for_test();
    let entry_id = assign(&router, 10, PROJECT, "2026-05-04").await;
    let (status, summary) = generate(&router, "2026-05-01", "2026-05-15").await;
    assert_eq!(status, StatusCode::CREATED);
    // Rejected overlap is not recorded
    let (status, _) = generate(&router, "2026-05-10", "2026-05-20").await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(&router, ADMIN, "GET", "/activity", None).await;

    assert_eq!(status, StatusCode::OK);
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["entity_type"], "PAYROLL_PERIOD");
    assert_eq!(records[0]["action"], "CREATE");
    assert_eq!(records[0]["entity_id"], summary["period"]["id"]);
    assert_eq!(records[1]["entity_type"], "SCHEDULE");
    assert_eq!(records[1]["entity_id"].as_u64(), Some(entry_id));

    let (status, body) = send(&router, ADMIN, "GET", "/activity?limit=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_activity_log_is_forbidden_to_non_admins() {
    let router = create_router_for_test();
    for caller in [SUPERVISOR, WORKER, CLIENT] {
        let (status, body) = send(&router, caller, "GET", "/activity", None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{:?}", caller);
        assert_eq!(body["code"], "FORBIDDEN");
    }
}

#[tokio::test]
async fn test_activity_log_rejects_bad_limit() {
    let router = create_router_for_test();
    let (status, body) = send(&router, ADMIN, "GET", "/activity?limit=many", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Error cases
// =============================================================================

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let router = create_router_for_test();

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/payroll/generate")
                .header("Content-Type", "application/json")
                .header("x-user-id", "1")
                .header("x-user-role", "admin")
                .body(Body::from("{ not valid json }"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(json["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_missing_field_returns_validation_error() {
    let router = create_router_for_test();

    let (status, body) = send(
        &router,
        ADMIN,
        "POST",
        "/payroll/generate",
        Some(json!({ "start_date": "2026-05-01" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_inverted_range_is_validation_error() {
    let router = create_router_for_test();
    let (status, body) = generate(&router, "2026-05-15", "2026-05-01").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unknown_role_header_is_rejected() {
    let router = create_router_for_test();
    let (status, body) = send(&router, (1, "owner"), "GET", "/payroll/periods", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}
