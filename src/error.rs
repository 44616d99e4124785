use rust_decimal::Decimal;
use thiserror::Error;

/// Data-validity failures raised by the report layer.
///
/// None of these are transient: they describe a bad snapshot or a refused
/// operation, never an I/O problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("expense '{id}' has a negative amount: {amount}")]
    NegativeAmount { id: String, amount: Decimal },
    #[error("expense at position {index} has no id")]
    MissingId { index: usize },
    #[error(
        "category '{name}' has {count} transaction{}; reassign or delete them first",
        plural(.count)
    )]
    CategoryInUse { name: String, count: usize },
}

pub type Result<T> = std::result::Result<T, ReportError>;

fn plural(count: &usize) -> &'static str {
    if *count == 1 {
        ""
    } else {
        "s"
    }
}
