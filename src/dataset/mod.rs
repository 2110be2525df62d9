// src/dataset/mod.rs

use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use std::{collections::HashSet, fs::File, io::Read, path::Path};
use tracing::warn;

/// A single scalar cell. The variant is decided once, when the Dataset is
/// built, so downstream consumers never re-inspect cell contents.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Missing,
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Infer a Value from one raw CSV field.
    /// An empty field (after trimming) is missing; integer parses win over
    /// float parses, and anything non-numeric is text.
    pub fn infer(raw: &str) -> Value {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Value::Missing
        } else if let Ok(i) = trimmed.parse::<i64>() {
            Value::Int(i)
        } else if let Ok(f) = trimmed.parse::<f64>() {
            Value::Float(f)
        } else {
            Value::Text(trimmed.to_string())
        }
    }
}

/// An in-memory table: ordered unique column names and ordered rows.
/// Every row holds exactly one Value per declared column. Read-only once
/// constructed.
#[derive(Debug)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Build a Dataset directly from columns and rows.
    /// Fails on duplicate column names or rows whose width doesn't match.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        if columns.is_empty() {
            bail!("dataset must declare at least one column");
        }
        let mut seen = HashSet::new();
        for col in &columns {
            if !seen.insert(col.as_str()) {
                bail!("duplicate column name: {}", col);
            }
        }
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                bail!(
                    "row {} has {} values but {} columns are declared",
                    idx,
                    row.len(),
                    columns.len()
                );
            }
        }
        Ok(Self { columns, rows })
    }

    /// Parse CSV from any reader. The first record is the header row; every
    /// following record becomes one row of inferred Values. Short records are
    /// padded with Missing, extra fields beyond the header width are dropped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let columns: Vec<String> = rdr
            .headers()
            .context("reading CSV header row")?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        if columns.is_empty() || columns.iter().all(|c| c.is_empty()) {
            bail!("CSV input has no header row");
        }

        let mut rows = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let record = result.with_context(|| format!("CSV parse error at record {}", idx))?;
            if record.len() > columns.len() {
                warn!(
                    record = idx,
                    fields = record.len(),
                    columns = columns.len(),
                    "record has more fields than header; extras dropped"
                );
            }
            let mut row: Vec<Value> = record
                .iter()
                .take(columns.len())
                .map(Value::infer)
                .collect();
            row.resize(columns.len(), Value::Missing);
            rows.push(row);
        }

        Self::new(columns, rows)
    }

    /// Open and parse a CSV file from disk.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path)
            .with_context(|| format!("opening CSV file {:?}", path.as_ref()))?;
        Self::from_reader(file)
            .with_context(|| format!("parsing CSV file {:?}", path.as_ref()))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Position of `name` in the column order, if declared.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }
}
