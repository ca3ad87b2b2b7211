//! Shared setup for service tests.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{Caller, ProjectId, Role, UserId, Worker};
use crate::store::{LedgerStore, MemoryTables};

use super::RequestContext;

pub const ADMIN: UserId = 1;
pub const SUPERVISOR: UserId = 2;
pub const WORKER: UserId = 10;
pub const OTHER_WORKER: UserId = 11;
pub const CLIENT: UserId = 30;

pub const PROJECT: ProjectId = 100;
pub const OTHER_PROJECT: ProjectId = 200;

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn today() -> NaiveDate {
    date(2026, 5, 10)
}

pub fn ctx(id: UserId, role: Role) -> RequestContext {
    RequestContext::at(Caller::new(id, role), today())
}

pub fn admin() -> RequestContext {
    ctx(ADMIN, Role::Admin)
}

pub fn supervisor() -> RequestContext {
    ctx(SUPERVISOR, Role::Supervisor)
}

pub fn worker() -> RequestContext {
    ctx(WORKER, Role::Worker)
}

pub fn client() -> RequestContext {
    ctx(CLIENT, Role::Client)
}

/// Tables with an admin, a supervisor on `PROJECT`, two workers and a
/// client linked to `PROJECT`.
pub fn seeded() -> MemoryTables {
    let mut tables = MemoryTables::default();

    tables
        .save_worker(Worker::new(ADMIN, "Admin", Role::Admin))
        .unwrap();

    let mut supervisor = Worker::new(SUPERVISOR, "Sofia Campos", Role::Supervisor);
    supervisor.hourly_rate = Some(dec("6000"));
    tables.save_worker(supervisor).unwrap();

    let mut worker = Worker::new(WORKER, "Carlos Rojas", Role::Worker);
    worker.hourly_rate = Some(dec("5000"));
    worker.monthly_salary = Some(dec("300000"));
    worker.start_date = Some(date(2025, 1, 1));
    tables.save_worker(worker).unwrap();

    let mut other = Worker::new(OTHER_WORKER, "Luis Vega", Role::Worker);
    other.hourly_rate = Some(dec("4000"));
    other.apply_deductions = false;
    tables.save_worker(other).unwrap();

    tables
        .save_worker(Worker::new(CLIENT, "Constructora Norte", Role::Client))
        .unwrap();

    tables.assign_project(SUPERVISOR, PROJECT).unwrap();
    tables.assign_project(CLIENT, PROJECT).unwrap();
    tables
}
