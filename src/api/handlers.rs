//! HTTP request handlers for the labor engine API.
//!
//! Handlers are a thin shell over [`Ledger`](crate::ledger::Ledger): they
//! read the caller from the `x-user-id` / `x-user-role` headers set by the
//! authentication proxy, decode the body, and map the outcome to JSON.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{Caller, DashboardFilter, NewPayrollPayment, Role};
use crate::services::{NewInvoice, PaymentPosting, RequestContext};

use super::request::{
    ActivityQuery, ApprovalQuery, AssignScheduleRequest, BatchResult, CalendarQuery,
    CommitLiquidationRequest, ConfirmBatchRequest, ConfirmScheduleRequest, CreateInvoiceRequest,
    DashboardQuery, DeductionsRequest, GeneratePayrollRequest, PayInvoiceRequest, PreviewQuery,
    WorkerPaymentRequest,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Header carrying the caller's user id.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the caller's role.
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/schedules", post(assign_schedule_handler))
        .route("/schedules/approval", get(approval_queue_handler))
        .route("/schedules/calendar", get(calendar_handler))
        .route("/schedules/confirm-batch", post(confirm_batch_handler))
        .route("/schedules/:id", delete(delete_schedule_handler))
        .route("/schedules/:id/confirm", post(confirm_schedule_handler))
        .route("/payroll/generate", post(generate_payroll_handler))
        .route("/payroll/periods", get(list_periods_handler))
        .route(
            "/payroll/periods/:id",
            get(period_summary_handler).delete(delete_period_handler),
        )
        .route("/payroll/periods/:id/confirm", post(confirm_period_handler))
        .route("/payroll/entries/:id/deductions", post(deductions_handler))
        .route("/budgets/:id", get(budget_status_handler))
        .route("/budgets/:id/invoices", post(create_invoice_handler))
        .route("/invoices/:id", delete(delete_invoice_handler))
        .route("/invoices/:id/pay", post(pay_invoice_handler))
        .route("/finance/dashboard", get(dashboard_handler))
        .route(
            "/workers/:id/payments",
            get(payment_history_handler).post(record_payment_handler),
        )
        .route(
            "/workers/:id/liquidation/preview",
            get(liquidation_preview_handler),
        )
        .route(
            "/workers/:id/liquidations",
            get(liquidation_history_handler).post(commit_liquidation_handler),
        )
        .route("/workers/:id/reactivate", post(reactivate_handler))
        .route("/activity", get(activity_handler))
        .with_state(state)
}

/// Reads the caller identity from the request headers.
///
/// A missing or unparsable header is a validation error naming the header.
pub fn caller_from_headers(headers: &HeaderMap) -> EngineResult<Caller> {
    let id = header_text(headers, USER_ID_HEADER)?
        .trim()
        .parse()
        .map_err(|_| EngineError::validation(USER_ID_HEADER, "expected a numeric user id"))?;
    let role: Role = header_text(headers, USER_ROLE_HEADER)?.parse()?;
    Ok(Caller::new(id, role))
}

fn header_text<'a>(headers: &'a HeaderMap, name: &str) -> EngineResult<&'a str> {
    headers
        .get(name)
        .ok_or_else(|| EngineError::validation(name, "header is required"))?
        .to_str()
        .map_err(|_| EngineError::validation(name, "header is not valid text"))
}

fn context(
    state: &AppState,
    headers: &HeaderMap,
    correlation_id: Uuid,
) -> EngineResult<RequestContext> {
    let caller = caller_from_headers(headers)?;
    Ok(state.request_context(caller, correlation_id))
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Logs the outcome of an operation and renders it.
fn respond<T: Serialize>(
    correlation_id: Uuid,
    operation: &str,
    status: StatusCode,
    result: EngineResult<T>,
) -> Response {
    match result {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                operation,
                "Request completed successfully"
            );
            json_response(status, body)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                operation,
                error = %err,
                "Request rejected"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> Response {
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
    ApiErrorResponse::bad_request(error).into_response()
}

fn query_rejection(correlation_id: Uuid, rejection: QueryRejection) -> Response {
    let body_text = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %body_text,
        "Query string rejected"
    );
    ApiErrorResponse::bad_request(ApiError::validation_error(body_text)).into_response()
}

// Schedules

async fn assign_schedule_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<AssignScheduleRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };
    let result = context(&state, &headers, correlation_id).and_then(|ctx| {
        let date = request.date()?;
        state
            .ledger()
            .assign_schedule(&ctx, request.project_id, request.worker_id, date)
    });
    respond(correlation_id, "assign schedule", StatusCode::CREATED, result)
}

async fn approval_queue_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<ApprovalQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection),
    };
    let result = context(&state, &headers, correlation_id).and_then(|ctx| {
        let date = query.date()?;
        state.ledger().approval_queue(&ctx, date, query.project_id)
    });
    respond(correlation_id, "approval queue", StatusCode::OK, result)
}

async fn calendar_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<CalendarQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection),
    };
    let result = context(&state, &headers, correlation_id).and_then(|ctx| {
        let (start, end) = query.range()?;
        state.ledger().calendar(&ctx, start, end)
    });
    respond(correlation_id, "calendar", StatusCode::OK, result)
}

async fn confirm_schedule_handler(
    State(state): State<AppState>,
    Path(entry_id): Path<u64>,
    headers: HeaderMap,
    payload: Result<Json<ConfirmScheduleRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };
    let (hours, overtime) = request.hours();
    let result = context(&state, &headers, correlation_id).and_then(|ctx| {
        state
            .ledger()
            .confirm_schedule(&ctx, entry_id, hours, overtime)
    });
    respond(correlation_id, "confirm schedule", StatusCode::OK, result)
}

async fn confirm_batch_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ConfirmBatchRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };
    let result = context(&state, &headers, correlation_id)
        .and_then(|ctx| state.ledger().confirm_schedule_batch(&ctx, &request.items))
        .map(|updated| BatchResult { updated });
    respond(correlation_id, "confirm schedule batch", StatusCode::OK, result)
}

async fn delete_schedule_handler(
    State(state): State<AppState>,
    Path(entry_id): Path<u64>,
    headers: HeaderMap,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = context(&state, &headers, correlation_id)
        .and_then(|ctx| state.ledger().delete_schedule(&ctx, entry_id));
    respond(correlation_id, "delete schedule", StatusCode::OK, result)
}

// Payroll

async fn generate_payroll_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<GeneratePayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll generation request");
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };
    let result = context(&state, &headers, correlation_id).and_then(|ctx| {
        let (start, end) = request.range()?;
        state.ledger().generate_payroll(&ctx, start, end)
    });
    respond(correlation_id, "generate payroll", StatusCode::CREATED, result)
}

async fn list_periods_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = context(&state, &headers, correlation_id)
        .and_then(|ctx| state.ledger().list_periods(&ctx));
    respond(correlation_id, "list payroll periods", StatusCode::OK, result)
}

async fn period_summary_handler(
    State(state): State<AppState>,
    Path(period_id): Path<u64>,
    headers: HeaderMap,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = context(&state, &headers, correlation_id)
        .and_then(|ctx| state.ledger().period_summary(&ctx, period_id));
    respond(correlation_id, "payroll period summary", StatusCode::OK, result)
}

async fn confirm_period_handler(
    State(state): State<AppState>,
    Path(period_id): Path<u64>,
    headers: HeaderMap,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = context(&state, &headers, correlation_id)
        .and_then(|ctx| state.ledger().confirm_period(&ctx, period_id));
    respond(correlation_id, "finalize payroll period", StatusCode::OK, result)
}

async fn delete_period_handler(
    State(state): State<AppState>,
    Path(period_id): Path<u64>,
    headers: HeaderMap,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = context(&state, &headers, correlation_id)
        .and_then(|ctx| state.ledger().delete_period(&ctx, period_id));
    respond(correlation_id, "delete payroll period", StatusCode::OK, result)
}

async fn deductions_handler(
    State(state): State<AppState>,
    Path(entry_id): Path<u64>,
    headers: HeaderMap,
    payload: Result<Json<DeductionsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };
    let result = context(&state, &headers, correlation_id)
        .and_then(|ctx| state.ledger().toggle_deductions(&ctx, entry_id, request.apply));
    respond(correlation_id, "toggle deductions", StatusCode::OK, result)
}

// Invoices and finance

async fn create_invoice_handler(
    State(state): State<AppState>,
    Path(budget_id): Path<u64>,
    headers: HeaderMap,
    payload: Result<Json<CreateInvoiceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };
    let result = context(&state, &headers, correlation_id).and_then(|ctx| {
        let invoice = NewInvoice::try_from(request)?;
        state.ledger().create_invoice(&ctx, budget_id, invoice)
    });
    respond(correlation_id, "create invoice", StatusCode::CREATED, result)
}

async fn delete_invoice_handler(
    State(state): State<AppState>,
    Path(invoice_id): Path<u64>,
    headers: HeaderMap,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = context(&state, &headers, correlation_id)
        .and_then(|ctx| state.ledger().delete_invoice(&ctx, invoice_id));
    respond(correlation_id, "delete invoice", StatusCode::OK, result)
}

async fn pay_invoice_handler(
    State(state): State<AppState>,
    Path(invoice_id): Path<u64>,
    headers: HeaderMap,
    payload: Result<Json<PayInvoiceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };
    let result = context(&state, &headers, correlation_id).and_then(|ctx| {
        let posting = PaymentPosting::try_from(request)?;
        state.ledger().pay_invoice(&ctx, invoice_id, posting)
    });
    respond(correlation_id, "pay invoice", StatusCode::OK, result)
}

async fn budget_status_handler(
    State(state): State<AppState>,
    Path(budget_id): Path<u64>,
    headers: HeaderMap,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = context(&state, &headers, correlation_id)
        .and_then(|ctx| state.ledger().budget_status(&ctx, budget_id));
    respond(correlation_id, "budget status", StatusCode::OK, result)
}

async fn dashboard_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection),
    };
    let result = context(&state, &headers, correlation_id).and_then(|ctx| {
        let filter = DashboardFilter::try_from(query)?;
        state.ledger().finance_dashboard(&ctx, &filter)
    });
    respond(correlation_id, "finance dashboard", StatusCode::OK, result)
}

// Activity

async fn activity_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<ActivityQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection),
    };
    let result = context(&state, &headers, correlation_id)
        .and_then(|ctx| state.ledger().activity_log(&ctx, query.limit()));
    respond(correlation_id, "activity log", StatusCode::OK, result)
}

// Workers

async fn record_payment_handler(
    State(state): State<AppState>,
    Path(worker_id): Path<u64>,
    headers: HeaderMap,
    payload: Result<Json<WorkerPaymentRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };
    let result = context(&state, &headers, correlation_id).and_then(|ctx| {
        let payment = NewPayrollPayment::try_from(request)?;
        state.ledger().record_payment(&ctx, worker_id, payment)
    });
    respond(correlation_id, "record worker payment", StatusCode::CREATED, result)
}

async fn payment_history_handler(
    State(state): State<AppState>,
    Path(worker_id): Path<u64>,
    headers: HeaderMap,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = context(&state, &headers, correlation_id)
        .and_then(|ctx| state.ledger().payment_history(&ctx, worker_id));
    respond(correlation_id, "worker payment history", StatusCode::OK, result)
}

async fn liquidation_preview_handler(
    State(state): State<AppState>,
    Path(worker_id): Path<u64>,
    headers: HeaderMap,
    query: Result<Query<PreviewQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection),
    };
    let result = context(&state, &headers, correlation_id).and_then(|ctx| {
        let (date, custom_start) = query.dates(ctx.today)?;
        state
            .ledger()
            .preview_liquidation(&ctx, worker_id, date, custom_start)
    });
    respond(correlation_id, "liquidation preview", StatusCode::OK, result)
}

async fn commit_liquidation_handler(
    State(state): State<AppState>,
    Path(worker_id): Path<u64>,
    headers: HeaderMap,
    payload: Result<Json<CommitLiquidationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };
    let result = context(&state, &headers, correlation_id).and_then(|ctx| {
        let date = request.date()?;
        state
            .ledger()
            .commit_liquidation(&ctx, worker_id, date, request.amounts)
    });
    respond(correlation_id, "commit liquidation", StatusCode::CREATED, result)
}

async fn liquidation_history_handler(
    State(state): State<AppState>,
    Path(worker_id): Path<u64>,
    headers: HeaderMap,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = context(&state, &headers, correlation_id)
        .and_then(|ctx| state.ledger().liquidation_history(&ctx, worker_id));
    respond(correlation_id, "liquidation history", StatusCode::OK, result)
}

async fn reactivate_handler(
    State(state): State<AppState>,
    Path(worker_id): Path<u64>,
    headers: HeaderMap,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = context(&state, &headers, correlation_id)
        .and_then(|ctx| state.ledger().reactivate_worker(&ctx, worker_id));
    respond(correlation_id, "reactivate worker", StatusCode::OK, result)
}
