//! Gross, social charge and net pay calculation.
//!
//! Gross pay is regular hours at the hourly rate plus overtime hours at the
//! rate times the overtime multiplier, rounded to the policy granularity.
//! Social charges are a fixed fraction of gross, rounded the same way, and
//! only apply to workers whose deduction flag is set.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::FinancialPolicy;
use crate::models::{PayrollEntry, PeriodTotals};

use super::rounding::{round_money, round_to_nearest};

/// The result of pricing a worker's hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayBreakdown {
    /// `hours × rate`, unrounded.
    pub regular_pay: Decimal,
    /// `overtime × rate × multiplier`, unrounded.
    pub overtime_pay: Decimal,
    /// Rounded gross salary.
    pub gross: Decimal,
    /// Rounded social charges (zero when deductions are off).
    pub social_charges: Decimal,
    /// `gross - social_charges`.
    pub net: Decimal,
}

/// Splits a gross amount into social charges and net pay.
///
/// Returns `(charges, net)`; `charges + net == gross` always holds.
///
/// # Examples
///
/// ```
/// use labor_engine::calculation::apply_deductions;
/// use labor_engine::config::FinancialPolicy;
/// use rust_decimal::Decimal;
///
/// let policy = FinancialPolicy::default();
/// let (charges, net) = apply_deductions(Decimal::from(60000), true, &policy);
/// assert_eq!(charges, Decimal::from(5500));
/// assert_eq!(net, Decimal::from(54500));
///
/// let (charges, net) = apply_deductions(Decimal::from(60000), false, &policy);
/// assert_eq!(charges, Decimal::ZERO);
/// assert_eq!(net, Decimal::from(60000));
/// ```
pub fn apply_deductions(
    gross: Decimal,
    apply: bool,
    policy: &FinancialPolicy,
) -> (Decimal, Decimal) {
    let charges = if apply {
        round_to_nearest(
            policy.rounding_granularity,
            gross * policy.social_charge_rate,
        )
    } else {
        Decimal::ZERO
    };
    (charges, gross - charges)
}

/// Prices regular and overtime hours at an hourly rate.
///
/// # Examples
///
/// ```
/// use labor_engine::calculation::calculate_pay;
/// use labor_engine::config::FinancialPolicy;
/// use rust_decimal::Decimal;
///
/// let policy = FinancialPolicy::default();
/// let pay = calculate_pay(Decimal::from(12), Decimal::ZERO, Decimal::from(5000), true, &policy);
///
/// assert_eq!(pay.gross, Decimal::from(60000));
/// assert_eq!(pay.social_charges, Decimal::from(5500));
/// assert_eq!(pay.net, Decimal::from(54500));
/// ```
pub fn calculate_pay(
    hours: Decimal,
    overtime: Decimal,
    rate: Decimal,
    apply: bool,
    policy: &FinancialPolicy,
) -> PayBreakdown {
    let regular_pay = hours * rate;
    let overtime_pay = overtime * rate * policy.overtime_multiplier;
    let gross = round_to_nearest(policy.rounding_granularity, regular_pay + overtime_pay);
    let (social_charges, net) = apply_deductions(gross, apply, policy);

    PayBreakdown {
        regular_pay,
        overtime_pay,
        gross,
        social_charges,
        net,
    }
}

/// Sums a set of payroll entries into period totals.
///
/// Employer charges and provisions are derived from the gross total;
/// derived amounts are rounded to cents.
pub fn summarize_entries(entries: &[PayrollEntry], policy: &FinancialPolicy) -> PeriodTotals {
    let mut totals = entries
        .iter()
        .fold(PeriodTotals::default(), |mut acc, entry| {
            acc.hours += entry.total_hours;
            acc.overtime += entry.overtime_hours;
            acc.gross += entry.gross_salary;
            acc.social_charges += entry.social_charges;
            acc.net += entry.net_salary;
            acc
        });

    totals.employer_charges = round_money(totals.gross * policy.employer_charge_rate);
    totals.provisions = round_money(totals.gross * policy.provisions_rate);
    totals.company_cost = totals.gross + totals.employer_charges + totals.provisions;
    totals
}
