//! Catalog records
//!
//! A record is one row of the tool catalog: a mapping from column header to
//! cell text. Only the columns in [`columns`] take part in similarity and
//! classification; any other column is carried along untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Column headers consumed from the tabular source (exact spelling)
pub mod columns {
    pub const TOOL_NAME: &str = "Tool Name";
    pub const PRIMARY_FUNCTION: &str = "Primary Function";
    pub const DATA_SOURCES: &str = "Data Sources";
    pub const TARGET_USER: &str = "Target User/Client";
    pub const ENVIRONMENT_TYPE: &str = "Environment Type";
    pub const DESCRIPTION: &str = "Description";
}

/// One catalog row, keyed by column header
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from `(column, value)` pairs
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Record {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Builder-style setter
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(column.into(), value.into());
        self
    }

    /// Cell text for a column; absent columns read as the empty string
    pub fn get(&self, column: &str) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }

    /// Cell text for a column, `None` when absent or blank
    pub fn get_non_empty(&self, column: &str) -> Option<&str> {
        let value = self.get(column);
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// The tool name, if present and not blank
    pub fn name(&self) -> Option<&str> {
        self.get_non_empty(columns::TOOL_NAME)
    }

    /// True when every cell is blank
    pub fn is_blank(&self) -> bool {
        self.fields.values().all(|v| v.trim().is_empty())
    }

    /// Iterate over all `(column, value)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A record paired with its derived identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tool {
    pub id: String,
    pub record: Record,
}

impl Tool {
    pub fn new(id: impl Into<String>, record: Record) -> Self {
        Tool {
            id: id.into(),
            record,
        }
    }

    /// Display name, falling back to `Unknown Tool <id>`
    pub fn display_name(&self) -> String {
        match self.record.name() {
            Some(name) => name.to_string(),
            None => format!("Unknown Tool {}", self.id),
        }
    }
}
