use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::{Category, CategoryDisplay};

/// A single expense entry as handed over by the data source.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: String,
    pub title: String,
    /// Never negative in a valid snapshot.
    pub amount: Decimal,
    pub category_id: Option<String>,
    /// Free-text category name carried by older records. Display only;
    /// grouping always goes through `category_id`.
    pub legacy_category: Option<String>,
    /// When the expense happened, not when it was recorded.
    pub date: DateTime<Utc>,
    pub owner_id: String,
}

impl Expense {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        amount: Decimal,
        category_id: Option<String>,
        date: DateTime<Utc>,
        owner_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            amount,
            category_id,
            legacy_category: None,
            date,
            owner_id: owner_id.into(),
        }
    }

    pub fn is_in_category(&self, category_id: &str) -> bool {
        self.category_id.as_deref() == Some(category_id)
    }

    /// The category this expense points at, if it exists in `categories`.
    pub fn category<'a>(&self, categories: &'a [Category]) -> Option<&'a Category> {
        self.category_id
            .as_deref()
            .and_then(|id| Category::find_by_id(categories, id))
    }

    /// Resolves the badge for this expense: the referenced category first,
    /// then the legacy label with neutral styling, then the fallback.
    pub fn category_display(&self, categories: &[Category]) -> CategoryDisplay {
        if let Some(category) = self.category(categories) {
            return category.display();
        }
        match self.legacy_category.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => CategoryDisplay::labelled(label),
            _ => CategoryDisplay::fallback(),
        }
    }
}
