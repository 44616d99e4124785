//! Expense aggregation for a personal expense tracker.
//!
//! The [`report`] module turns a snapshot of [`Expense`] and [`Category`]
//! records into the totals, category breakdowns and time-windowed figures
//! shown on the summary screens. Everything in it is a pure function of its
//! inputs. [`import`] and [`config`] are the collaborators the command line
//! front end uses to get a snapshot into memory.

pub mod config;
pub mod error;
pub mod format;
pub mod import;
pub mod models;
pub mod report;
pub mod session;

pub use config::Config;
pub use error::{ReportError, Result};
pub use models::{Category, CategoryDisplay, Expense};
pub use report::{
    category_breakdown, count_for_category, ensure_category_unused, percentage_of_total,
    recent_expenses, resolve_category_display, total_amount, total_for_category,
    windowed_totals, CategoryBreakdown, Snapshot, WindowedTotals,
};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Installs a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Defaults to warnings from this crate only. Safe to call more than once.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("expense_report=warn"));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
