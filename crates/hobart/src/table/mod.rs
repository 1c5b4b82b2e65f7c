//! Tabular reshaping of raw statement records.
//!
//! This module turns the provider's record lists into tables:
//! - Normalization flattens nested fields, sorts reporting periods by
//!   calendar date, and infers per-column dtypes
//! - Transposition pivots a normalized table so each period becomes a
//!   column labelled by its `calendarYear`
//!
//! # Example
//!
//! ```
//! use hobart::{RawRecord, StatementTable};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let records: Vec<RawRecord> = serde_json::from_value(serde_json::json!([
//!         {"date": "2021-09-25", "calendarYear": "2021", "total": 100},
//!         {"date": "2020-09-26", "calendarYear": "2020", "total": 90}
//!     ]))?;
//!
//!     let table = StatementTable::from_records(records)?;
//!     assert_eq!(table.height(), 2);
//!
//!     let pivot = table.transposed()?;
//!     assert_eq!(pivot.labels().to_vec(), ["2020", "2021"]);
//!     assert_eq!(pivot.value("total", 0), Some("90"));
//!     Ok(())
//! }
//! ```

pub mod normalize;
pub mod transpose;

// Re-export main types
pub use normalize::StatementTable;
pub use transpose::TransposedTable;
