//! HTTP API module for the labor engine.
//!
//! This module exposes the engine operations as a JSON REST API. Caller
//! identity is supplied by an upstream authentication layer through the
//! `x-user-id` and `x-user-role` headers.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{USER_ID_HEADER, USER_ROLE_HEADER, caller_from_headers, create_router};
pub use request::{
    ActivityQuery, ApprovalQuery, AssignScheduleRequest, BatchResult, CalendarQuery,
    CommitLiquidationRequest, ConfirmBatchRequest, ConfirmScheduleRequest, CreateInvoiceRequest,
    DashboardQuery, DeductionsRequest, GeneratePayrollRequest, PayInvoiceRequest, PreviewQuery,
    WorkerPaymentRequest, parse_date,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
