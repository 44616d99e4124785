use chrono::{DateTime, TimeZone};
use rust_decimal::Decimal;

use super::{CategoryBreakdown, WindowedTotals};
use crate::error::{ReportError, Result};
use crate::models::{Category, CategoryDisplay, Expense};

/// An immutable, validated copy of the records a report is computed from.
///
/// Construction is the only place records are checked; the aggregation
/// methods assume every amount is non-negative and every id present.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    expenses: Vec<Expense>,
    categories: Vec<Category>,
}

impl Snapshot {
    /// Fails on the first malformed expense instead of summing around it.
    pub fn new(expenses: Vec<Expense>, categories: Vec<Category>) -> Result<Self> {
        validate_expenses(&expenses)?;
        tracing::debug!(
            expenses = expenses.len(),
            categories = categories.len(),
            "snapshot accepted"
        );
        Ok(Self {
            expenses,
            categories,
        })
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn total(&self) -> Decimal {
        super::total_amount(&self.expenses)
    }

    pub fn total_for_category(&self, category_id: &str) -> Decimal {
        super::total_for_category(&self.expenses, category_id)
    }

    pub fn count_for_category(&self, category_id: &str) -> usize {
        super::count_for_category(&self.expenses, category_id)
    }

    pub fn windowed_totals<Tz: TimeZone>(&self, reference: &DateTime<Tz>) -> WindowedTotals {
        super::windowed_totals(&self.expenses, reference)
    }

    pub fn category_breakdown(&self) -> Vec<CategoryBreakdown> {
        super::category_breakdown(&self.expenses, &self.categories)
    }

    pub fn recent(&self, limit: usize) -> Vec<&Expense> {
        super::recent_expenses(&self.expenses, limit)
    }

    pub fn resolve_category(&self, category_id: Option<&str>) -> CategoryDisplay {
        super::resolve_category_display(category_id, &self.categories)
    }

    /// Looks a category up by id, falling back to a case-insensitive name match.
    pub fn find_category(&self, key: &str) -> Option<&Category> {
        Category::find_by_id(&self.categories, key)
            .or_else(|| Category::find_by_name(&self.categories, key))
    }

    pub fn ensure_category_unused(&self, category: &Category) -> Result<()> {
        super::ensure_category_unused(&self.expenses, category)
    }
}

/// Checks every expense for a present id and a non-negative amount.
pub fn validate_expenses(expenses: &[Expense]) -> Result<()> {
    for (index, expense) in expenses.iter().enumerate() {
        if expense.id.trim().is_empty() {
            tracing::warn!(index, title = %expense.title, "rejecting expense without id");
            return Err(ReportError::MissingId { index });
        }
        if expense.amount < Decimal::ZERO {
            tracing::warn!(id = %expense.id, amount = %expense.amount, "rejecting negative expense");
            return Err(ReportError::NegativeAmount {
                id: expense.id.clone(),
                amount: expense.amount,
            });
        }
    }
    Ok(())
}
