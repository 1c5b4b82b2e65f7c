//! Year-labelled transposition of normalized statement tables.

use polars::prelude::*;

use crate::error::{FmpError, Result};
use crate::table::normalize::{StatementTable, parse_calendar_date};

/// A statement table pivoted so fields are rows and reporting periods are
/// columns, labelled by their `calendarYear` values.
///
/// Years can repeat across periods, so labels are positional and may
/// contain duplicates; label lookup resolves to the first match while
/// positional access distinguishes every column. Cells are rendered
/// values, `None` where the source cell was null.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransposedTable {
    labels: Vec<String>,
    fields: Vec<String>,
    cells: Vec<Vec<Option<String>>>,
}

impl TransposedTable {
    /// Year labels in chronological column order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Field names in row order.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Number of year columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.labels.len()
    }

    /// Number of field rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.fields.len()
    }

    /// Whether the table has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Cells of one field row, in column order.
    #[must_use]
    pub fn row(&self, field: &str) -> Option<&[Option<String>]> {
        let index = self.fields.iter().position(|name| name == field)?;
        Some(&self.cells[index])
    }

    /// One rendered cell; `None` when the field is unknown, the column is
    /// out of range, or the cell is null.
    #[must_use]
    pub fn value(&self, field: &str, column: usize) -> Option<&str> {
        self.row(field)?.get(column)?.as_deref()
    }

    /// Index of the first column carrying `label`.
    #[must_use]
    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|candidate| candidate == label)
    }

    /// Materialize the table as a frame with a `field` column followed by
    /// one column per year label.
    ///
    /// # Errors
    /// Returns `FmpError::Polars` when duplicate year labels collide; the
    /// grid form carries duplicates, a frame cannot.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let mut columns = Vec::with_capacity(self.labels.len() + 1);
        columns.push(Column::new("field".into(), self.fields.clone()));
        for (index, label) in self.labels.iter().enumerate() {
            let cells: Vec<Option<String>> =
                self.cells.iter().map(|row| row[index].clone()).collect();
            columns.push(Column::new(label.as_str().into(), cells));
        }
        Ok(DataFrame::new(columns)?)
    }
}

impl StatementTable {
    /// Pivot the table so each reporting period becomes a column labelled
    /// by its `calendarYear` value.
    ///
    /// Rows are ordered by calendar date before pivoting, so the result
    /// does not depend on the stored row order.
    ///
    /// # Errors
    /// Returns `FmpError::Schema` when `calendarYear` is absent or null,
    /// or when the `date` column cannot be interpreted as calendar dates.
    pub fn transposed(&self) -> Result<TransposedTable> {
        let frame = self.frame();
        if frame.width() == 0 {
            return Ok(TransposedTable {
                labels: Vec::new(),
                fields: Vec::new(),
                cells: Vec::new(),
            });
        }

        let order = date_order(frame)?;

        let years = frame
            .column("calendarYear")
            .map_err(|_| FmpError::Schema("missing calendarYear column".to_string()))?
            .as_materialized_series();
        let mut labels = Vec::with_capacity(order.len());
        for &row in &order {
            let label = cell_text(years.get(row)?)
                .ok_or_else(|| FmpError::Schema(format!("row {row} has a null calendarYear")))?;
            labels.push(label);
        }

        let mut fields = Vec::with_capacity(frame.width());
        let mut cells = Vec::with_capacity(frame.width());
        for column in frame.get_columns() {
            let series = column.as_materialized_series();
            let mut rendered = Vec::with_capacity(order.len());
            for &row in &order {
                rendered.push(cell_text(series.get(row)?));
            }
            fields.push(column.name().to_string());
            cells.push(rendered);
        }

        Ok(TransposedTable {
            labels,
            fields,
            cells,
        })
    }
}

/// Row indices sorted ascending by the parsed `date` column.
fn date_order(frame: &DataFrame) -> Result<Vec<usize>> {
    let dates = frame
        .column("date")
        .map_err(|_| FmpError::Schema("missing date column".to_string()))?
        .as_materialized_series();

    let mut keyed = Vec::with_capacity(frame.height());
    for row in 0..frame.height() {
        let text = cell_text(dates.get(row)?)
            .ok_or_else(|| FmpError::Schema(format!("row {row} has a null date")))?;
        let date = parse_calendar_date(&text)
            .ok_or_else(|| FmpError::Schema(format!("row {row} has an unparsable date: {text}")))?;
        keyed.push((date, row));
    }

    keyed.sort_by_key(|(date, _)| *date);
    Ok(keyed.into_iter().map(|(_, row)| row).collect())
}

/// Render one cell. Integer and integral float cells render without a
/// fractional part.
fn cell_text(value: AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        AnyValue::String(text) => Some(text.to_string()),
        AnyValue::StringOwned(text) => Some(text.to_string()),
        AnyValue::Int64(number) => Some(number.to_string()),
        AnyValue::Float64(number) => Some(number.to_string()),
        AnyValue::Boolean(flag) => Some(flag.to_string()),
        other => Some(format!("{other:?}")),
    }
}
