//! Budget aggregation.
//!
//! The adjudicated amount is what the contract awards: every line with its
//! tax, plus the extension when it is both allowed and switched on. Invoices
//! count toward the invoiced total as soon as they are issued.

use rust_decimal::Decimal;

use crate::models::{BudgetLine, Invoice, ProjectBudget};

/// Totals for one budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetTotals {
    /// Lines with tax plus the active extension.
    pub adjudicated: Decimal,
    /// Sum of invoice amounts, whatever their status.
    pub invoiced: Decimal,
    /// `adjudicated - invoiced`.
    pub balance: Decimal,
}

/// Returns the adjudicated total of a budget.
pub fn adjudicated_total(budget: &ProjectBudget, lines: &[BudgetLine]) -> Decimal {
    lines.iter().map(BudgetLine::total).sum::<Decimal>() + budget.effective_prorogue()
}

/// Returns the sum of all invoice amounts.
pub fn invoiced_total(invoices: &[Invoice]) -> Decimal {
    invoices.iter().map(|invoice| invoice.amount).sum()
}

/// Computes adjudicated, invoiced and balance for a budget.
///
/// # Examples
///
/// ```
/// use labor_engine::calculation::budget_totals;
/// use labor_engine::models::{BudgetLine, ProjectBudget};
/// use rust_decimal::Decimal;
///
/// let budget = ProjectBudget::new(1, 10);
/// let lines = vec![BudgetLine {
///     id: 1,
///     budget_id: 1,
///     name: "Estructura".to_string(),
///     subtotal: Decimal::from(1000),
///     tax_percentage: Decimal::from(13),
/// }];
///
/// let totals = budget_totals(&budget, &lines, &[]);
/// assert_eq!(totals.adjudicated, Decimal::from(1130));
/// assert_eq!(totals.balance, Decimal::from(1130));
/// ```
pub fn budget_totals(
    budget: &ProjectBudget,
    lines: &[BudgetLine],
    invoices: &[Invoice],
) -> BudgetTotals {
    let adjudicated = adjudicated_total(budget, lines);
    let invoiced = invoiced_total(invoices);
    BudgetTotals {
        adjudicated,
        invoiced,
        balance: adjudicated - invoiced,
    }
}
