//! Typed in-memory dataset.

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{BiasLensError, Result};

/// A single cell value.
///
/// Numbers keep the text they were parsed from, so `01`, `1` and `1.0` stay
/// distinct when a column is grouped by raw value. Serializes as JSON
/// `null`, a number, or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CellRepr", into = "CellRepr")]
pub enum Value {
    /// Missing/null value.
    Missing,
    /// Numeric value with its source text.
    Number { value: f64, raw: String },
    /// Text value.
    Text(String),
}

/// Wire form of [`Value`].
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum CellRepr {
    Missing,
    Number(f64),
    Text(String),
}

impl From<CellRepr> for Value {
    fn from(repr: CellRepr) -> Self {
        match repr {
            CellRepr::Missing => Value::Missing,
            CellRepr::Number(n) => Value::number(n),
            CellRepr::Text(s) => Value::Text(s),
        }
    }
}

impl From<Value> for CellRepr {
    fn from(value: Value) -> Self {
        match value {
            Value::Missing => CellRepr::Missing,
            Value::Number { value, .. } => CellRepr::Number(value),
            Value::Text(s) => CellRepr::Text(s),
        }
    }
}

impl Value {
    /// A number whose source text is its shortest display form.
    pub fn number(value: f64) -> Self {
        Value::Number {
            value,
            raw: value.to_string(),
        }
    }

    /// Classify a raw text cell.
    ///
    /// Null markers become [`Value::Missing`], anything that parses as a
    /// float becomes [`Value::Number`] (NaN counts as missing), and the rest
    /// is kept verbatim as [`Value::Text`].
    pub fn parse(raw: &str) -> Self {
        if Self::is_null_marker(raw) {
            return Value::Missing;
        }

        let trimmed = raw.trim();
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_nan() => Value::Missing,
            Ok(n) => Value::Number {
                value: n,
                raw: trimmed.to_string(),
            },
            Err(_) => Value::Text(raw.to_string()),
        }
    }

    /// Check if a raw string represents a missing/null value.
    pub fn is_null_marker(value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("na")
            || trimmed.eq_ignore_ascii_case("n/a")
            || trimmed.eq_ignore_ascii_case("nan")
            || trimmed.eq_ignore_ascii_case("null")
            || trimmed.eq_ignore_ascii_case("none")
            || trimmed.eq_ignore_ascii_case("nil")
            || trimmed == "."
            || trimmed == "-"
    }

    pub fn is_missing(&self) -> bool {
        match self {
            Value::Missing => true,
            Value::Number { value, .. } => value.is_nan(),
            Value::Text(_) => false,
        }
    }

    /// Numeric content, if this is a present number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number { value, .. } if !value.is_nan() => Some(*value),
            _ => None,
        }
    }

    /// Group label used when the column is treated as categorical.
    ///
    /// Numbers use their source text, so distinct spellings of the same
    /// quantity are distinct groups.
    pub fn label(&self) -> Option<String> {
        if self.is_missing() {
            return None;
        }
        Some(self.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => Ok(()),
            Value::Number { raw, .. } => f.write_str(raw),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Missing)
    }
}

/// Parsed tabular data: named columns and rows of equal width.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Create a dataset, checking that column names are unique and every row
    /// has one value per column.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        if columns.is_empty() {
            return Err(BiasLensError::MalformedInput("No columns found".to_string()));
        }

        let mut seen = HashSet::new();
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(BiasLensError::MalformedInput(format!(
                    "Duplicate column name '{}'",
                    name
                )));
            }
        }

        if let Some((idx, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(BiasLensError::MalformedInput(format!(
                "Row {} has {} values, expected {}",
                idx + 1,
                row.len(),
                columns.len()
            )));
        }

        Ok(Self { columns, rows })
    }

    /// Build a dataset from row records keyed by column name.
    ///
    /// Column order follows the first record; all records must share the
    /// same column set.
    pub fn from_records(records: Vec<IndexMap<String, Value>>) -> Result<Self> {
        let Some(first) = records.first() else {
            return Err(BiasLensError::MalformedInput("No records found".to_string()));
        };
        let columns: Vec<String> = first.keys().cloned().collect();

        let mut rows = Vec::with_capacity(records.len());
        for (idx, mut record) in records.into_iter().enumerate() {
            if record.len() != columns.len() {
                return Err(BiasLensError::MalformedInput(format!(
                    "Record {} has {} columns, expected {}",
                    idx + 1,
                    record.len(),
                    columns.len()
                )));
            }
            let mut row = Vec::with_capacity(columns.len());
            for name in &columns {
                let value = record.swap_remove(name).ok_or_else(|| {
                    BiasLensError::MalformedInput(format!(
                        "Record {} is missing column '{}'",
                        idx + 1,
                        name
                    ))
                })?;
                row.push(value);
            }
            rows.push(row);
        }

        Self::new(columns, rows)
    }

    /// Column names in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Get all values for a column by name.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Value>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[index]))
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value() {
        assert_eq!(Value::parse("42"), Value::from(42.0));
        assert_eq!(Value::parse(" 3.5 "), Value::from(3.5));
        assert_eq!(Value::parse("F"), Value::Text("F".to_string()));
        assert_eq!(Value::parse(""), Value::Missing);
        assert_eq!(Value::parse("NaN"), Value::Missing);
        assert_eq!(Value::parse("n/a"), Value::Missing);
    }

    #[test]
    fn test_number_keeps_source_text() {
        let padded = Value::parse("01");
        assert_eq!(padded.as_number(), Some(1.0));
        assert_eq!(padded.label().as_deref(), Some("01"));
        assert_eq!(Value::parse("1.0").label().as_deref(), Some("1.0"));
        assert_ne!(Value::parse("1"), Value::parse("1.0"));
    }

    #[test]
    fn test_is_null_marker() {
        assert!(Value::is_null_marker(""));
        assert!(Value::is_null_marker("NA"));
        assert!(Value::is_null_marker("na"));
        assert!(Value::is_null_marker("N/A"));
        assert!(Value::is_null_marker("null"));
        assert!(Value::is_null_marker("NULL"));
        assert!(Value::is_null_marker("."));
        assert!(!Value::is_null_marker("value"));
        assert!(!Value::is_null_marker("0"));
    }

    #[test]
    fn test_label_drops_integral_fraction() {
        assert_eq!(Value::from(2.0).label().as_deref(), Some("2"));
        assert_eq!(Value::from(2.5).label().as_deref(), Some("2.5"));
        assert_eq!(Value::Missing.label(), None);
    }

    #[test]
    fn test_new_rejects_ragged_rows() {
        let err = Dataset::new(
            vec!["a".into(), "b".into()],
            vec![vec![Value::from(1.0)]],
        )
        .unwrap_err();
        assert!(matches!(err, BiasLensError::MalformedInput(_)));
    }

    #[test]
    fn test_new_rejects_duplicate_columns() {
        let err = Dataset::new(vec!["a".into(), "a".into()], Vec::new()).unwrap_err();
        assert!(matches!(err, BiasLensError::MalformedInput(_)));
    }

    #[test]
    fn test_from_records() {
        let mut r1 = IndexMap::new();
        r1.insert("gender".to_string(), Value::from("M"));
        r1.insert("age".to_string(), Value::from(20.0));
        let mut r2 = IndexMap::new();
        r2.insert("age".to_string(), Value::Missing);
        r2.insert("gender".to_string(), Value::from("F"));

        let ds = Dataset::from_records(vec![r1, r2]).unwrap();
        assert_eq!(ds.columns(), ["gender", "age"]);
        assert_eq!(ds.get(1, 0), Some(&Value::from("F")));
        assert_eq!(ds.get(1, 1), Some(&Value::Missing));
    }

    #[test]
    fn test_from_records_mismatched_keys() {
        let mut r1 = IndexMap::new();
        r1.insert("gender".to_string(), Value::from("M"));
        let mut r2 = IndexMap::new();
        r2.insert("sex".to_string(), Value::from("F"));

        let err = Dataset::from_records(vec![r1, r2]).unwrap_err();
        assert!(matches!(err, BiasLensError::MalformedInput(_)));
    }

    #[test]
    fn test_value_from_json() {
        let values: Vec<Value> = serde_json::from_str(r#"[null, 1.5, "x"]"#).unwrap();
        assert_eq!(
            values,
            vec![Value::Missing, Value::from(1.5), Value::Text("x".into())]
        );
        assert_eq!(
            serde_json::to_string(&Value::parse("007")).unwrap(),
            "7.0"
        );
    }
}
