//! Raw, untyped tabular input as it arrives from a loader.
//!
//! Nothing here is trusted: column presence, element types and row counts are
//! checked by the kernel's validation pass before any geometry is computed.

use serde::{Deserialize, Serialize};

/// Column storage, tagged with its element type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnData {
    Text(Vec<String>),
    Float(Vec<f64>),
    Integer(Vec<i64>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Text(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Integer(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element type name used in validation messages.
    pub fn dtype(&self) -> &'static str {
        match self {
            ColumnData::Text(_) => "text",
            ColumnData::Float(_) => "float",
            ColumnData::Integer(_) => "integer",
        }
    }

    pub fn as_text(&self) -> Option<&[String]> {
        match self {
            ColumnData::Text(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<&[f64]> {
        match self {
            ColumnData::Float(v) => Some(v.as_slice()),
            _ => None,
        }
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawColumn {
    pub name: String,
    pub data: ColumnData,
}

impl RawColumn {
    pub fn text(name: impl Into<String>, values: &[&str]) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Text(values.iter().map(|s| (*s).to_owned()).collect()),
        }
    }

    pub fn float(name: impl Into<String>, values: &[f64]) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Float(values.to_vec()),
        }
    }

    pub fn integer(name: impl Into<String>, values: &[i64]) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Integer(values.to_vec()),
        }
    }
}

/// A named table of columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub name: String,
    pub columns: Vec<RawColumn>,
}

impl RawTable {
    pub fn new(name: impl Into<String>, columns: Vec<RawColumn>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    pub fn column(&self, name: &str) -> Option<&RawColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Row count taken from the first column; ragged tables are a validation error.
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.data.len())
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}
