use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::format::DEFAULT_CURRENCY_SYMBOL;

const CONFIG_FILE: &str = "config.json";
const EXPENSES_FILE: &str = "expenses.csv";
const CATEGORIES_FILE: &str = "categories.csv";

/// User settings for the report front end.
///
/// Every field has a default, so a partial `config.json` is fine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub currency_symbol: String,
    /// How many expenses `recent` lists when no count is given.
    pub recent_limit: usize,
    pub expenses_file: Option<PathBuf>,
    pub categories_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            recent_limit: 3,
            expenses_file: None,
            categories_file: None,
        }
    }
}

impl Config {
    /// Load from the platform config directory, or defaults if there is none.
    pub fn load() -> Result<Self> {
        match project_dirs() {
            Some(dirs) => Self::load_from(&dirs.config_dir().join(CONFIG_FILE)),
            None => {
                tracing::debug!("no config directory; using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found; using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Expense CSV to read when none is given on the command line.
    pub fn expenses_path(&self) -> Result<PathBuf> {
        self.expenses_file
            .clone()
            .map(Ok)
            .unwrap_or_else(|| data_file(EXPENSES_FILE))
    }

    /// Category CSV to read when none is given. May not exist.
    pub fn categories_path(&self) -> Result<PathBuf> {
        self.categories_file
            .clone()
            .map(Ok)
            .unwrap_or_else(|| data_file(CATEGORIES_FILE))
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "expense-report", "ExpenseReport")
}

fn data_file(name: &str) -> Result<PathBuf> {
    let dirs =
        project_dirs().ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(dirs.data_dir().join(name))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
