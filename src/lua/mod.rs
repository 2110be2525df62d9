// src/lua/mod.rs
//
// The Lua literal serializer: a pure transformation from (Dataset, column
// selection) to the text of a `local data = {...}` declaration. All I/O and
// column-selection UI lives with the callers.

use crate::dataset::{Dataset, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SerializeError {
    /// A requested column name is not declared in the dataset. Raised before
    /// any output is produced.
    #[error("column not found: {0}")]
    ColumnNotFound(String),
    /// The features selection was empty.
    #[error("no feature columns selected")]
    EmptySelection,
}

/// Serialize the selected columns as a 2-D Lua table, one `{...}` row-entry
/// per dataset row, cells in selection order.
///
/// Row and column order are preserved exactly as given; nothing is reordered,
/// filtered, or deduplicated. A zero-row dataset yields an empty declaration,
/// not an error.
pub fn serialize_table<S: AsRef<str>>(
    dataset: &Dataset,
    column_names: &[S],
) -> Result<String, SerializeError> {
    if column_names.is_empty() {
        return Err(SerializeError::EmptySelection);
    }
    let indices = resolve_columns(dataset, column_names)?;

    let mut out = String::from("local data = {\n");
    for row in dataset.rows() {
        out.push_str("  {");
        for (pos, &idx) in indices.iter().enumerate() {
            if pos > 0 {
                out.push_str(", ");
            }
            out.push_str(&format_value(&row[idx]));
        }
        out.push_str("},\n");
    }
    out.push_str("}\n");
    Ok(out)
}

/// Serialize a single column as a flat Lua array, one entry per dataset row.
pub fn serialize_array(dataset: &Dataset, column_name: &str) -> Result<String, SerializeError> {
    let idx = dataset
        .column_index(column_name)
        .ok_or_else(|| SerializeError::ColumnNotFound(column_name.to_string()))?;

    let mut out = String::from("local data = {");
    for (pos, row) in dataset.rows().iter().enumerate() {
        if pos > 0 {
            out.push_str(", ");
        }
        out.push_str(&format_value(&row[idx]));
    }
    out.push_str("}\n");
    Ok(out)
}

/// Map every requested name to its column index, failing on the first name
/// the dataset doesn't declare.
fn resolve_columns<S: AsRef<str>>(
    dataset: &Dataset,
    column_names: &[S],
) -> Result<Vec<usize>, SerializeError> {
    column_names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            dataset
                .column_index(name)
                .ok_or_else(|| SerializeError::ColumnNotFound(name.to_string()))
        })
        .collect()
}

/// Format one cell as Lua source text.
///
/// Missing cells become `nil`, numbers print unquoted via their default
/// Display (shortest round-trip for floats), and everything else is wrapped
/// in double quotes. Quote characters inside text are NOT escaped, so text
/// containing `"` produces a literal that is not valid Lua on its own; this
/// is a known limitation.
fn format_value(value: &Value) -> String {
    match value {
        Value::Missing => "nil".to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Text(s) => format!("\"{}\"", s),
    }
}
