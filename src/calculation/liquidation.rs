//! Liquidation (separation settlement) calculation.
//!
//! A settlement has three parts, all estimated from the employment span:
//!
//! - vacation: one day accrued per month worked, paid at the daily salary;
//! - aguinaldo: the year-end bonus, one twelfth of the monthly salary per
//!   month worked;
//! - salary due: standard-length days not yet covered by a salary payment.
//!
//! Months worked use a fixed average month length, so the figures are
//! estimates rather than a reconstruction of actual period salaries.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::FinancialPolicy;
use crate::models::{LiquidationPreview, Worker};

use super::rounding::round_money;

/// Returns the months worked between `start` and `reference`.
///
/// Negative spans count as zero.
pub fn months_worked(start: NaiveDate, reference: NaiveDate, policy: &FinancialPolicy) -> Decimal {
    let days = (reference - start).num_days().max(0);
    if policy.days_per_month <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    Decimal::from(days) / policy.days_per_month
}

/// Returns the number of days whose salary is still owed on `reference`.
///
/// With a previous payment, wages are settled up to and including its date.
/// Without one, every day from `start` through `reference` is owed.
pub fn unpaid_days(
    start: Option<NaiveDate>,
    last_payment: Option<NaiveDate>,
    reference: NaiveDate,
) -> i64 {
    match (last_payment, start) {
        (Some(paid_through), _) => (reference - paid_through).num_days().max(0),
        (None, Some(start)) if reference >= start => (reference - start).num_days() + 1,
        _ => 0,
    }
}

/// Returns the hourly rate used to price unpaid days.
///
/// The worker's hourly rate wins; otherwise the monthly salary is spread over
/// the policy's salary days and daily hours.
pub fn settlement_hourly_rate(worker: &Worker, policy: &FinancialPolicy) -> Decimal {
    if let Some(rate) = worker.hourly_rate.filter(|rate| *rate > Decimal::ZERO) {
        return rate;
    }
    let divisor = policy.salary_days_per_month * policy.standard_daily_hours;
    match worker.monthly_salary {
        Some(monthly) if divisor > Decimal::ZERO => monthly / divisor,
        _ => Decimal::ZERO,
    }
}

/// Computes a liquidation preview for a worker.
///
/// # Arguments
///
/// * `worker` - The worker being settled
/// * `reference_date` - The settlement date
/// * `last_payment` - Date of the worker's most recent salary payment, if any
/// * `custom_start` - Overrides the worker's start date when set
/// * `policy` - Month length, daily hours and salary divisors
///
/// # Examples
///
/// ```
/// use labor_engine::calculation::calculate_liquidation;
/// use labor_engine::config::FinancialPolicy;
/// use labor_engine::models::{Role, Worker};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut worker = Worker::new(7, "Ana Mora", Role::Worker);
/// worker.monthly_salary = Some(Decimal::from(300000));
/// worker.start_date = NaiveDate::from_ymd_opt(2026, 1, 1);
///
/// let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
/// let preview = calculate_liquidation(&worker, today, None, None, &FinancialPolicy::default());
///
/// assert_eq!(preview.months_worked, Decimal::ZERO);
/// assert_eq!(preview.aguinaldo_amount, Decimal::ZERO);
/// // The start date itself is owed: 1 day × 8 h × (300000 / 30 / 8)
/// assert_eq!(preview.salary_due, Decimal::from(10000));
/// ```
pub fn calculate_liquidation(
    worker: &Worker,
    reference_date: NaiveDate,
    last_payment: Option<NaiveDate>,
    custom_start: Option<NaiveDate>,
    policy: &FinancialPolicy,
) -> LiquidationPreview {
    let effective_start = custom_start.or(worker.start_date);
    let monthly = worker.monthly_salary.unwrap_or(Decimal::ZERO);

    let months = effective_start
        .map(|start| months_worked(start, reference_date, policy))
        .unwrap_or(Decimal::ZERO);
    let vacation_days = months;

    let vacation_amount = if policy.salary_days_per_month > Decimal::ZERO {
        monthly / policy.salary_days_per_month * vacation_days
    } else {
        Decimal::ZERO
    };

    let aguinaldo_amount = if months > Decimal::ZERO && policy.aguinaldo_months > Decimal::ZERO {
        monthly / policy.aguinaldo_months * months
    } else {
        Decimal::ZERO
    };

    let owed_days = unpaid_days(effective_start, last_payment, reference_date);
    let salary_due = Decimal::from(owed_days)
        * policy.standard_daily_hours
        * settlement_hourly_rate(worker, policy);

    let total = round_money(vacation_amount + aguinaldo_amount + salary_due);

    LiquidationPreview {
        worker_id: worker.id,
        name: worker.full_name.clone(),
        start_date: effective_start,
        monthly_salary: worker.monthly_salary,
        calculation_date: reference_date,
        months_worked: round_money(months),
        vacation_days: round_money(vacation_days),
        vacation_amount: round_money(vacation_amount),
        aguinaldo_amount: round_money(aguinaldo_amount),
        salary_due: round_money(salary_due),
        total,
    }
}
