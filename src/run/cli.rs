use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fmt::Write;
use std::path::PathBuf;

use expense_report::format::{format_amount_with, format_percent, truncate};
use expense_report::import::{parse_date, CsvImporter};
use expense_report::{Config, Snapshot};

const VALUE_FLAGS: &[&str] = &["--expenses", "--categories", "--at"];

pub(crate) fn as_cli(args: &[String], config: &Config) -> Result<()> {
    let rest = &args[2..];
    match args[1].as_str() {
        "summary" | "s" => cli_summary(rest, config),
        "categories" | "c" => cli_categories(rest, config),
        "recent" | "r" => cli_recent(rest, config),
        "check-delete" => cli_check_delete(rest, config),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("expense-report {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

pub(crate) fn print_usage() {
    println!("expense-report — spending summaries from an expense export");
    println!();
    println!("Usage: expense-report <command> [options]");
    println!();
    println!("Commands:");
    println!("  summary                       Total, month, week, today and daily average");
    println!("  categories                    Spending per category with share of total");
    println!("  recent [N]                    Latest N expenses (default from config)");
    println!("  check-delete <category>       Whether a category can be deleted");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Options:");
    println!("  --expenses <file.csv>         Expense export (default: data dir)");
    println!("  --categories <file.csv>       Category export (default: data dir, optional)");
    println!("  --at <timestamp>              Reference time for summary (default: now)");
}

fn cli_summary(args: &[String], config: &Config) -> Result<()> {
    let snapshot = load_snapshot(args, config)?;
    let reference: DateTime<Local> = match flag_value(args, "--at") {
        Some(raw) => parse_date(raw)
            .with_context(|| format!("Invalid --at value: {raw}"))?
            .with_timezone(&Local),
        None => Local::now(),
    };
    print!("{}", render_summary(&snapshot, &reference, config));
    Ok(())
}

fn cli_categories(args: &[String], config: &Config) -> Result<()> {
    let snapshot = load_snapshot(args, config)?;
    print!("{}", render_categories(&snapshot, config));
    Ok(())
}

fn cli_recent(args: &[String], config: &Config) -> Result<()> {
    let limit = match positional(args).first() {
        Some(raw) => raw
            .parse::<usize>()
            .with_context(|| format!("Invalid count: {raw}"))?,
        None => config.recent_limit,
    };
    let snapshot = load_snapshot(args, config)?;
    print!("{}", render_recent(&snapshot, limit, config));
    Ok(())
}

fn render_summary(snapshot: &Snapshot, reference: &DateTime<Local>, config: &Config) -> String {
    let totals = snapshot.windowed_totals(reference);
    let money = |v| format_amount_with(v, &config.currency_symbol);

    let mut out = String::new();
    let _ = writeln!(out, "Spending — {}", reference.format("%Y-%m-%d %H:%M"));
    let _ = writeln!(out, "{}", "─".repeat(40));
    let _ = writeln!(out, "  Total:        {}", money(totals.total));
    let _ = writeln!(out, "  This month:   {}", money(totals.month));
    let _ = writeln!(out, "  This week:    {}", money(totals.week));
    let _ = writeln!(out, "  Today:        {}", money(totals.today));
    let _ = writeln!(out, "  Avg per day:  {}", money(totals.avg_per_day));
    let _ = writeln!(out, "  Transactions: {}", snapshot.expenses().len());
    out
}

fn render_categories(snapshot: &Snapshot, config: &Config) -> String {
    let rows = snapshot.category_breakdown();
    if rows.is_empty() {
        return "No categories\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{:<24} {:>14} {:>6} {:>7}", "Category", "Amount", "Count", "Share");
    let _ = writeln!(out, "{}", "─".repeat(54));
    for row in &rows {
        let _ = writeln!(
            out,
            "{:<24} {:>14} {:>6} {:>7}",
            truncate(&row.display.name, 24),
            format_amount_with(row.total, &config.currency_symbol),
            row.count,
            format_percent(row.percentage),
        );
    }
    let _ = writeln!(out, "{}", "─".repeat(54));
    let _ = writeln!(
        out,
        "{:<24} {:>14}",
        "Total",
        format_amount_with(snapshot.total(), &config.currency_symbol)
    );
    out
}

fn render_recent(snapshot: &Snapshot, limit: usize, config: &Config) -> String {
    let recent = snapshot.recent(limit);
    if recent.is_empty() {
        return "No expenses\n".to_string();
    }

    let mut out = String::new();
    for expense in recent {
        let category = expense.category_display(snapshot.categories());
        let _ = writeln!(
            out,
            "{}  {:<28} {:<16} -{}",
            expense.date.with_timezone(&Local).format("%b %d, %Y"),
            truncate(&expense.title, 28),
            truncate(&category.name, 16),
            format_amount_with(expense.amount, &config.currency_symbol),
        );
    }
    out
}

fn cli_check_delete(args: &[String], config: &Config) -> Result<()> {
    let key = positional(args)
        .first()
        .copied()
        .ok_or_else(|| anyhow::anyhow!("Usage: expense-report check-delete <category>"))?;
    let snapshot = load_snapshot(args, config)?;
    let category = snapshot
        .find_category(key)
        .ok_or_else(|| anyhow::anyhow!("Category '{key}' not found"))?;

    snapshot.ensure_category_unused(category)?;
    println!("Category '{}' has no transactions and can be deleted", category.name);
    Ok(())
}

fn load_snapshot(args: &[String], config: &Config) -> Result<Snapshot> {
    let expenses_path = match flag_value(args, "--expenses") {
        Some(p) => PathBuf::from(shellexpand(p)),
        None => config.expenses_path()?,
    };
    if !expenses_path.exists() {
        anyhow::bail!("File not found: {}", expenses_path.display());
    }
    let expenses = CsvImporter::load_expenses(&expenses_path)?;

    // Categories are optional; without them everything shows as "Other".
    let categories = match flag_value(args, "--categories") {
        Some(p) => CsvImporter::load_categories(&PathBuf::from(shellexpand(p)))?,
        None => {
            let path = config.categories_path()?;
            if path.exists() {
                CsvImporter::load_categories(&path)?
            } else {
                Vec::new()
            }
        }
    };

    Ok(Snapshot::new(expenses, categories)?)
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// Arguments that are neither flags nor flag values.
fn positional(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
        } else if VALUE_FLAGS.contains(&arg.as_str()) {
            skip_next = true;
        } else if !arg.starts_with('-') {
            out.push(arg.as_str());
        }
    }
    out
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
