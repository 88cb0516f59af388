//! Symbol to company display-name directory

use crate::error::ConfigError;
use std::collections::HashMap;
use std::path::Path;

/// Label used for symbols absent from the directory.
pub const FALLBACK_COMPANY_NAME: &str = "Stock";

/// Built-in names for well-known large caps.
pub const DEFAULT_COMPANY_NAMES: &[(&str, &str)] = &[
    ("AAPL", "Apple Inc."),
    ("MSFT", "Microsoft Corp."),
    ("GOOG", "Alphabet Inc."),
    ("GOOGL", "Alphabet Inc."),
    ("AMZN", "Amazon.com Inc."),
    ("NVDA", "NVIDIA Corp."),
    ("META", "Meta Platforms"),
    ("TSLA", "Tesla Inc."),
    ("BRK", "Berkshire Hathaway"),
    ("JPM", "JPMorgan Chase"),
    ("V", "Visa Inc."),
    ("JNJ", "Johnson & Johnson"),
    ("WMT", "Walmart Inc."),
    ("PG", "Procter & Gamble"),
    ("MA", "Mastercard Inc."),
    ("UNH", "UnitedHealth Group"),
    ("HD", "Home Depot"),
    ("DIS", "Walt Disney Co."),
    ("BAC", "Bank of America"),
    ("XOM", "Exxon Mobil"),
];

/// Read-only symbol to display-name table.
///
/// Built once at startup from the defaults plus optional overrides and then
/// shared immutably.
#[derive(Debug, Clone)]
pub struct CompanyDirectory {
    names: HashMap<String, String>,
}

impl Default for CompanyDirectory {
    fn default() -> Self {
        Self {
            names: DEFAULT_COMPANY_NAMES
                .iter()
                .map(|(symbol, name)| (symbol.to_string(), name.to_string()))
                .collect(),
        }
    }
}

impl CompanyDirectory {
    pub fn empty() -> Self {
        Self {
            names: HashMap::new(),
        }
    }

    /// Add or replace entries.
    pub fn with_overrides<I, S, N>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, N)>,
        S: Into<String>,
        N: Into<String>,
    {
        self.names
            .extend(entries.into_iter().map(|(s, n)| (s.into(), n.into())));
        self
    }

    /// Defaults extended with a JSON object of `{"SYMBOL": "Name"}` entries.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let overrides: HashMap<String, String> =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        Ok(Self::default().with_overrides(overrides))
    }

    pub fn lookup(&self, symbol: &str) -> &str {
        self.names
            .get(symbol)
            .map(String::as_str)
            .unwrap_or(FALLBACK_COMPANY_NAME)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
