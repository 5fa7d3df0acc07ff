//! Row and cell values for one sheet.
//!
//! The shapes mirror the visualization endpoint's JSON: a row is a `c` array
//! whose entries are either a cell object (`v` raw value, `f` optional
//! formatted rendering) or null. Null entries are kept in place so column
//! indexes stay aligned with the configured field list.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    #[serde(rename = "v", default)]
    pub value: Value,
    #[serde(rename = "f", default, skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Row {
    #[serde(rename = "c", default)]
    pub cells: Vec<Option<Cell>>,
}

/// Ordered rows for one sheet. Comparison is order-sensitive and deep.
pub type RowCollection = Vec<Row>;

impl Cell {
    pub fn new(value: Value) -> Self {
        Self {
            value,
            formatted: None,
        }
    }

    pub fn with_formatted(value: Value, formatted: &str) -> Self {
        Self {
            value,
            formatted: Some(formatted.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }
}

impl Row {
    /// Build a row of plain cells from raw values.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Self {
            cells: values.into_iter().map(|v| Some(Cell::new(v))).collect(),
        }
    }
}
