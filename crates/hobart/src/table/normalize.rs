//! Normalization of raw statement records into tabular form.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use polars::prelude::*;
use serde_json::Value;

use crate::error::{FmpError, Result};
use crate::statement::RawRecord;

/// Date formats accepted in the `date` field, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%Y-%m-%d %H:%M:%S"];

/// Parse a `date` field value as a calendar date.
pub(crate) fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

/// A normalized statement table.
///
/// Rows are reporting periods sorted ascending by `date`; columns are the
/// union of the flattened record fields, in lexicographic order.
#[derive(Debug, Clone)]
pub struct StatementTable {
    frame: DataFrame,
}

impl StatementTable {
    /// Normalize raw provider records into a table.
    ///
    /// Nested objects are flattened to dot-joined column names, rows are
    /// sorted ascending by calendar date and re-indexed from zero, and one
    /// dtype per column is inferred from the JSON values: `Int64` when
    /// every present value is an integer, `Float64` when every present
    /// value is numeric, `Boolean` when every present value is a bool,
    /// `String` otherwise. Missing fields and JSON nulls become null
    /// cells.
    ///
    /// # Errors
    /// Returns `FmpError::Schema` when a record is missing a parsable
    /// `date` or when flattened field names collide. An empty record
    /// sequence is not an error and yields an empty table.
    pub fn from_records(records: Vec<RawRecord>) -> Result<Self> {
        if records.is_empty() {
            return Ok(Self {
                frame: DataFrame::empty(),
            });
        }

        let mut rows = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let flat = flatten_record(record)?;
            let date = record_date(&flat, index)?;
            rows.push((date, flat));
        }

        // Stable, so records sharing a date keep provider order.
        rows.sort_by_key(|(date, _)| *date);

        let mut names = BTreeSet::new();
        for (_, flat) in &rows {
            names.extend(flat.keys().cloned());
        }

        let mut columns = Vec::with_capacity(names.len());
        for name in &names {
            let values: Vec<Option<&Value>> =
                rows.iter().map(|(_, flat)| flat.get(name)).collect();
            let kind = infer_column_kind(&values);
            columns.push(build_column(name, &values, kind));
        }

        Ok(Self {
            frame: DataFrame::new(columns)?,
        })
    }

    /// The underlying frame.
    #[must_use]
    pub const fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Consume the table, returning the frame.
    #[must_use]
    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    /// Number of reporting periods.
    #[must_use]
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Number of fields.
    #[must_use]
    pub fn width(&self) -> usize {
        self.frame.width()
    }

    /// Whether the table holds no reporting periods.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Field names in column order.
    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        self.frame.get_column_names_str()
    }
}

/// Flatten one record into dot-joined field paths.
fn flatten_record(record: &RawRecord) -> Result<BTreeMap<String, Value>> {
    let mut flat = BTreeMap::new();
    for (key, value) in record {
        flatten_value(key, value, &mut flat)?;
    }
    Ok(flat)
}

fn flatten_value(path: &str, value: &Value, flat: &mut BTreeMap<String, Value>) -> Result<()> {
    if let Value::Object(nested) = value {
        for (key, value) in nested {
            flatten_value(&format!("{path}.{key}"), value, flat)?;
        }
        return Ok(());
    }

    if flat.insert(path.to_string(), value.clone()).is_some() {
        return Err(FmpError::Schema(format!(
            "flattened field {path} collides with an existing field"
        )));
    }
    Ok(())
}

/// Extract and parse the required `date` field of one flattened record.
fn record_date(flat: &BTreeMap<String, Value>, index: usize) -> Result<NaiveDate> {
    let raw = match flat.get("date") {
        Some(Value::String(raw)) => raw,
        Some(_) => {
            return Err(FmpError::Schema(format!(
                "record {index} has a non-string date field"
            )));
        }
        None => {
            return Err(FmpError::Schema(format!(
                "record {index} is missing the date field"
            )));
        }
    };

    parse_calendar_date(raw)
        .ok_or_else(|| FmpError::Schema(format!("record {index} has an unparsable date: {raw}")))
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Int,
    Float,
    Bool,
    Text,
}

fn infer_column_kind(values: &[Option<&Value>]) -> ColumnKind {
    let mut kind = None;
    for value in values.iter().copied().flatten() {
        let observed = match value {
            Value::Null => continue,
            Value::Bool(_) => ColumnKind::Bool,
            Value::Number(n) if n.is_i64() => ColumnKind::Int,
            Value::Number(_) => ColumnKind::Float,
            _ => ColumnKind::Text,
        };
        kind = Some(match (kind, observed) {
            (None, next) => next,
            (Some(current), next) if current == next => current,
            (Some(ColumnKind::Int), ColumnKind::Float)
            | (Some(ColumnKind::Float), ColumnKind::Int) => ColumnKind::Float,
            _ => return ColumnKind::Text,
        });
    }
    kind.unwrap_or(ColumnKind::Text)
}

fn build_column(name: &str, values: &[Option<&Value>], kind: ColumnKind) -> Column {
    match kind {
        ColumnKind::Int => {
            let cells: Vec<Option<i64>> =
                values.iter().map(|v| v.and_then(Value::as_i64)).collect();
            Column::new(name.into(), cells)
        }
        ColumnKind::Float => {
            let cells: Vec<Option<f64>> =
                values.iter().map(|v| v.and_then(Value::as_f64)).collect();
            Column::new(name.into(), cells)
        }
        ColumnKind::Bool => {
            let cells: Vec<Option<bool>> =
                values.iter().map(|v| v.and_then(Value::as_bool)).collect();
            Column::new(name.into(), cells)
        }
        ColumnKind::Text => {
            let cells: Vec<Option<String>> =
                values.iter().map(|v| v.and_then(text_cell)).collect();
            Column::new(name.into(), cells)
        }
    }
}

/// Render one JSON value for a text column. Non-scalar values keep their
/// JSON text.
fn text_cell(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}
