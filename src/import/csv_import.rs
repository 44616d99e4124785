use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::models::{Category, Expense, FALLBACK_CATEGORY_COLOR, FALLBACK_CATEGORY_ICON};

/// Reads expense and category exports into in-memory records.
///
/// Columns are found by header name, so column order does not matter.
/// Amounts and dates are normalized here; a value that cannot be parsed is an
/// error naming the row, never a silent zero or epoch.
pub struct CsvImporter;

struct ExpenseColumns {
    id: usize,
    title: Option<usize>,
    amount: usize,
    category_id: Option<usize>,
    legacy_category: Option<usize>,
    date: usize,
    owner_id: Option<usize>,
}

struct CategoryColumns {
    id: usize,
    name: usize,
    color: Option<usize>,
    icon: Option<usize>,
}

impl CsvImporter {
    pub fn load_expenses(path: &Path) -> Result<Vec<Expense>> {
        let (headers, rows) = read_rows(path)?;
        let expenses = Self::parse_expenses(&headers, &rows)
            .with_context(|| format!("Failed to load expenses from {}", path.display()))?;
        tracing::debug!(path = %path.display(), count = expenses.len(), "loaded expenses");
        Ok(expenses)
    }

    pub fn load_categories(path: &Path) -> Result<Vec<Category>> {
        let (headers, rows) = read_rows(path)?;
        let categories = Self::parse_categories(&headers, &rows)
            .with_context(|| format!("Failed to load categories from {}", path.display()))?;
        tracing::debug!(path = %path.display(), count = categories.len(), "loaded categories");
        Ok(categories)
    }

    pub fn parse_expenses(headers: &[String], rows: &[Vec<String>]) -> Result<Vec<Expense>> {
        let cols = ExpenseColumns {
            id: require_column(headers, &["id"])?,
            title: find_column(headers, &["title", "description"]),
            amount: require_column(headers, &["amount"])?,
            category_id: find_column(headers, &["categoryid"]),
            legacy_category: find_column(headers, &["category"]),
            date: require_column(headers, &["date"])?,
            owner_id: find_column(headers, &["ownerid", "userid"]),
        };

        let mut expenses = Vec::new();
        for (i, row) in rows.iter().enumerate() {
            if is_blank(row) {
                continue;
            }
            // Header is line 1.
            let line = i + 2;

            let id = field(row, Some(cols.id));
            if id.is_empty() {
                anyhow::bail!("Row {line}: missing id");
            }

            let date_str = field(row, Some(cols.date));
            let date = parse_date(&date_str)
                .with_context(|| format!("Row {line}: failed to parse date '{date_str}'"))?;

            let amount_str = field(row, Some(cols.amount));
            let amount = parse_amount(&amount_str)
                .with_context(|| format!("Row {line}: failed to parse amount '{amount_str}'"))?;

            expenses.push(Expense {
                id,
                title: field(row, cols.title),
                amount,
                category_id: non_empty(field(row, cols.category_id)),
                legacy_category: non_empty(field(row, cols.legacy_category)),
                date,
                owner_id: field(row, cols.owner_id),
            });
        }

        Ok(expenses)
    }

    pub fn parse_categories(headers: &[String], rows: &[Vec<String>]) -> Result<Vec<Category>> {
        let cols = CategoryColumns {
            id: require_column(headers, &["id"])?,
            name: require_column(headers, &["name"])?,
            color: find_column(headers, &["color"]),
            icon: find_column(headers, &["icon"]),
        };

        Ok(rows
            .iter()
            .filter(|row| !is_blank(row))
            .map(|row| Category {
                id: field(row, Some(cols.id)),
                name: field(row, Some(cols.name)),
                color: non_empty(field(row, cols.color))
                    .unwrap_or_else(|| FALLBACK_CATEGORY_COLOR.to_string()),
                icon: non_empty(field(row, cols.icon))
                    .unwrap_or_else(|| FALLBACK_CATEGORY_ICON.to_string()),
            })
            .collect())
    }
}

/// Parse an exported timestamp into an instant.
///
/// RFC 3339 strings carry their own offset. Timestamps without one, and bare
/// dates (taken as midnight), are read in the local time zone.
pub fn parse_date(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return local_to_utc(naive);
        }
    }
    for fmt in &["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return local_to_utc(d.and_time(NaiveTime::MIN));
        }
    }
    anyhow::bail!("Could not parse date: {}", s)
}

/// Parse a monetary amount, tolerating `$` and thousands separators.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let cleaned = s.replace(['$', ',', '"'], "").trim().to_string();
    if cleaned.is_empty() {
        anyhow::bail!("Amount is empty");
    }
    Decimal::from_str(&cleaned).context(format!("Failed to parse '{}' as decimal", s))
}

fn local_to_utc(naive: NaiveDateTime) -> Result<DateTime<Utc>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| anyhow::anyhow!("{naive} does not exist in the local time zone"))
}

fn read_rows(path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let headers: Vec<String> = rdr
        .headers()
        .context("Failed to read CSV header")?
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.context("Failed to read CSV record")?;
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }
    Ok((headers, rows))
}

/// Case-insensitive header lookup that ignores spaces and underscores.
fn find_column(headers: &[String], names: &[&str]) -> Option<usize> {
    let normalize = |s: &str| s.trim().to_lowercase().replace(['_', ' '], "");
    let wanted: Vec<String> = names.iter().map(|&n| normalize(n)).collect();
    headers
        .iter()
        .position(|h| wanted.contains(&normalize(h.as_str())))
}

fn require_column(headers: &[String], names: &[&str]) -> Result<usize> {
    find_column(headers, names)
        .ok_or_else(|| anyhow::anyhow!("Missing required column '{}'", names[0]))
}

fn field(row: &[String], col: Option<usize>) -> String {
    col.and_then(|c| row.get(c))
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|f| f.trim().is_empty())
}

#[cfg(test)]
#[path = "csv_import_tests.rs"]
mod tests;
