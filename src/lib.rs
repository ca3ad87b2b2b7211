//! Labor engine for construction projects
//!
//! This crate tracks daily worker assignments, turns confirmed hours into
//! payroll periods with social-charge deductions, follows client invoices
//! against project budgets, and computes worker liquidations (vacation,
//! year-end bonus and unpaid salary) at separation.
//!
//! Operations go through [`ledger::Ledger`], which runs each one in a single
//! store transaction; [`api`] exposes them over HTTP.

#![warn(missing_docs)]

pub mod access;
pub mod api;
pub mod audit;
pub mod calculation;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod services;
pub mod store;
