//! Spending figures derived from an expense snapshot.
//!
//! Every function here reads the records it is given and returns fresh
//! values; nothing is cached between calls.

mod snapshot;
pub mod window;

use chrono::{DateTime, TimeZone};
use rust_decimal::Decimal;

use crate::error::{ReportError, Result};
use crate::models::{Category, CategoryDisplay, Expense};

pub use snapshot::{validate_expenses, Snapshot};
pub use window::ReportWindows;

/// Totals over the nested time windows around a reference instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowedTotals {
    pub total: Decimal,
    /// Month to date.
    pub month: Decimal,
    /// Trailing seven days plus the reference day.
    pub week: Decimal,
    pub today: Decimal,
    /// `month / days_in_month`.
    pub avg_per_day: Decimal,
    pub days_in_month: u32,
    pub days_elapsed: u32,
}

impl WindowedTotals {
    /// Month-to-date spending spread over the days elapsed so far.
    ///
    /// `avg_per_day` divides by the full month length instead, which reads
    /// low early in the month.
    pub fn avg_per_elapsed_day(&self) -> Decimal {
        average(self.month, self.days_elapsed)
    }
}

/// One row of the per-category spending table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBreakdown {
    /// `None` for the row collecting uncategorized expenses.
    pub category_id: Option<String>,
    pub display: CategoryDisplay,
    pub total: Decimal,
    pub count: usize,
    /// Share of the grand total, full precision.
    pub percentage: Decimal,
}

pub fn total_amount(expenses: &[Expense]) -> Decimal {
    expenses.iter().map(|e| e.amount).sum()
}

pub fn total_for_category(expenses: &[Expense], category_id: &str) -> Decimal {
    expenses
        .iter()
        .filter(|e| e.is_in_category(category_id))
        .map(|e| e.amount)
        .sum()
}

pub fn count_for_category(expenses: &[Expense], category_id: &str) -> usize {
    expenses
        .iter()
        .filter(|e| e.is_in_category(category_id))
        .count()
}

/// `category_total` as a percentage of `grand_total`, clamped to `[0, 100]`.
///
/// A zero (or negative) grand total yields zero rather than dividing. A
/// share too large to represent saturates at 100.
pub fn percentage_of_total(category_total: Decimal, grand_total: Decimal) -> Decimal {
    if grand_total <= Decimal::ZERO || category_total <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let pct = category_total
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(grand_total))
        .or_else(|| {
            category_total
                .checked_div(grand_total)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        })
        .unwrap_or(Decimal::ONE_HUNDRED);
    pct.min(Decimal::ONE_HUNDRED)
}

/// Totals for today, the trailing week and the month to date, all relative
/// to `reference` and evaluated in its time zone.
pub fn windowed_totals<Tz: TimeZone>(
    expenses: &[Expense],
    reference: &DateTime<Tz>,
) -> WindowedTotals {
    let windows = ReportWindows::around(reference);
    let mut totals = WindowedTotals {
        days_in_month: windows.days_in_month(),
        days_elapsed: windows.days_elapsed(),
        ..WindowedTotals::default()
    };

    for expense in expenses {
        totals.total += expense.amount;
        if windows.in_month(&expense.date) {
            totals.month += expense.amount;
        }
        if windows.in_week(&expense.date) {
            totals.week += expense.amount;
        }
        if windows.is_today(&expense.date) {
            totals.today += expense.amount;
        }
    }
    totals.avg_per_day = average(totals.month, totals.days_in_month);

    tracing::debug!(
        expenses = expenses.len(),
        day = %windows.today(),
        total = %totals.total,
        month = %totals.month,
        week = %totals.week,
        today = %totals.today,
        "computed windowed totals"
    );
    totals
}

/// Display attributes for `category_id`, or the "Other" fallback when the id
/// is missing or unknown.
pub fn resolve_category_display(
    category_id: Option<&str>,
    categories: &[Category],
) -> CategoryDisplay {
    category_id
        .and_then(|id| Category::find_by_id(categories, id))
        .map(Category::display)
        .unwrap_or_else(CategoryDisplay::fallback)
}

/// Per-category totals in the order of `categories`, zero rows included.
///
/// Expenses whose category is missing or unknown are collected in a trailing
/// fallback row, which is only present when there are such expenses.
pub fn category_breakdown(
    expenses: &[Expense],
    categories: &[Category],
) -> Vec<CategoryBreakdown> {
    let grand_total = total_amount(expenses);

    let mut rows: Vec<CategoryBreakdown> = categories
        .iter()
        .map(|category| {
            let total = total_for_category(expenses, &category.id);
            CategoryBreakdown {
                category_id: Some(category.id.clone()),
                display: category.display(),
                total,
                count: count_for_category(expenses, &category.id),
                percentage: percentage_of_total(total, grand_total),
            }
        })
        .collect();

    let (count, total) = expenses
        .iter()
        .filter(|e| e.category(categories).is_none())
        .fold((0usize, Decimal::ZERO), |(count, total), e| {
            (count + 1, total + e.amount)
        });
    if count > 0 {
        rows.push(CategoryBreakdown {
            category_id: None,
            display: CategoryDisplay::fallback(),
            total,
            count,
            percentage: percentage_of_total(total, grand_total),
        });
    }

    rows
}

/// Refuses to let a category with expenses be deleted.
pub fn ensure_category_unused(expenses: &[Expense], category: &Category) -> Result<()> {
    let count = count_for_category(expenses, &category.id);
    if count > 0 {
        return Err(ReportError::CategoryInUse {
            name: category.name.clone(),
            count,
        });
    }
    Ok(())
}

/// The `limit` most recent expenses, newest first. Ties keep id order.
pub fn recent_expenses(expenses: &[Expense], limit: usize) -> Vec<&Expense> {
    let mut sorted: Vec<&Expense> = expenses.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
    sorted.truncate(limit);
    sorted
}

fn average(amount: Decimal, days: u32) -> Decimal {
    if days == 0 {
        return Decimal::ZERO;
    }
    amount / Decimal::from(days)
}
