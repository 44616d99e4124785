mod category;
mod expense;

pub use category::{
    Category, CategoryDisplay, FALLBACK_CATEGORY_COLOR, FALLBACK_CATEGORY_ICON,
    FALLBACK_CATEGORY_NAME,
};
pub use expense::Expense;
