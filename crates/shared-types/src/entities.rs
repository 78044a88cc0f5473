//! # Core Domain Entities
//!
//! - **Identifiers**: `IdentifierKind`
//! - **Tabular data**: `FieldInfo`, `Record`

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// The lexical shape of the identifiers a source (or a column) contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum IdentifierKind {
    #[serde(rename = "integers")]
    Integers,
    #[serde(rename = "floats")]
    Floats,
    #[serde(rename = "prefixed integers")]
    PrefixedIntegers,
    #[serde(rename = "text")]
    #[default]
    Text,
}

impl IdentifierKind {
    /// The stored label of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierKind::Integers => "integers",
            IdentifierKind::Floats => "floats",
            IdentifierKind::PrefixedIntegers => "prefixed integers",
            IdentifierKind::Text => "text",
        }
    }

    /// Parse a stored label. Unknown or empty labels are treated as text.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "integers" => IdentifierKind::Integers,
            "floats" => IdentifierKind::Floats,
            "prefixed integers" => IdentifierKind::PrefixedIntegers,
            _ => IdentifierKind::Text,
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// TABULAR DATA
// =============================================================================

/// Describes one field (column) of an input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldInfo {
    /// Header or name of the field.
    pub header: String,
    /// Detected identifier kind of the field's values.
    #[serde(rename = "type")]
    pub kind: IdentifierKind,
    /// Position of the field in the record.
    pub order: usize,
}

/// A single row of tabular input.
///
/// Fields keep their header order. Each field holds one or more values, so a
/// translated field can carry several targets for one source identifier.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    fields: Vec<String>,
    values: Vec<Vec<String>>,
}

impl Record {
    /// Build a record from a header row and one data row.
    ///
    /// Missing trailing cells become empty values; surplus cells are ignored.
    pub fn from_row(headers: &[String], cells: &[String]) -> Self {
        let values = cells.iter().map(|c| vec![c.clone()]).collect();
        Self::from_values(headers, values)
    }

    /// Build a record whose cells may already hold several values each.
    ///
    /// Missing trailing cells become a single empty value; surplus cells are
    /// ignored.
    pub fn from_values(headers: &[String], mut values: Vec<Vec<String>>) -> Self {
        values.truncate(headers.len());
        values.resize_with(headers.len(), || vec![String::new()]);
        Self {
            fields: headers.to_vec(),
            values,
        }
    }

    /// Field names in order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Values of the named field, empty if the field does not exist.
    pub fn values(&self, field: &str) -> &[String] {
        self.position(field)
            .map(|i| self.values[i].as_slice())
            .unwrap_or(&[])
    }

    /// Replace the values of a field, appending the field if it is new.
    pub fn set(&mut self, field: &str, values: Vec<String>) {
        match self.position(field) {
            Some(i) => self.values[i] = values,
            None => {
                self.fields.push(field.to_string());
                self.values.push(values);
            }
        }
    }

    /// Iterate `(field, values)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .zip(self.values.iter())
            .map(|(f, v)| (f.as_str(), v.as_slice()))
    }

    /// Render one cell per field, joining multiple values with `sep`.
    pub fn joined_cells(&self, sep: &str) -> Vec<String> {
        self.values.iter().map(|v| v.join(sep)).collect()
    }

    fn position(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == field)
    }
}
