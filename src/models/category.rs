/// Label shown for expenses whose category cannot be resolved.
pub const FALLBACK_CATEGORY_NAME: &str = "Other";
pub const FALLBACK_CATEGORY_COLOR: &str = "#64748b";
pub const FALLBACK_CATEGORY_ICON: &str = "ellipsis-horizontal";

/// A user-defined grouping label for expenses.
///
/// `color` and `icon` are display tokens; nothing in this crate interprets them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: String,
    pub icon: String,
}

impl Category {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        color: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
            icon: icon.into(),
        }
    }

    /// Find a category by name (case-insensitive) in a slice.
    pub fn find_by_name<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
        let lower = name.to_lowercase();
        categories.iter().find(|c| c.name.to_lowercase() == lower)
    }

    /// Find a category by ID in a slice.
    pub fn find_by_id<'a>(categories: &'a [Category], id: &str) -> Option<&'a Category> {
        categories.iter().find(|c| c.id == id)
    }

    pub fn display(&self) -> CategoryDisplay {
        CategoryDisplay {
            name: self.name.clone(),
            color: self.color.clone(),
            icon: self.icon.clone(),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// What the presentation layer needs to draw a category badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDisplay {
    pub name: String,
    pub color: String,
    pub icon: String,
}

impl CategoryDisplay {
    pub fn fallback() -> Self {
        Self::labelled(FALLBACK_CATEGORY_NAME)
    }

    /// A display with the given name and the fallback styling.
    pub fn labelled(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: FALLBACK_CATEGORY_COLOR.to_string(),
            icon: FALLBACK_CATEGORY_ICON.to_string(),
        }
    }
}
