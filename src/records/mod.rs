// src/records/mod.rs
//! Row mapping and validity filtering for the three spreadsheet-backed collections.
//!
//! Each collection maps one positional row of string cells into a typed record. Short
//! rows are padded with empty strings; cells past the declared columns are ignored.

pub mod achievement;
pub mod news;
pub mod project;

pub use achievement::Achievement;
pub use news::NewsItem;
pub use project::Project;

use serde::Serialize;

use crate::sheets::SheetRange;

/// A record that can be read from one spreadsheet row.
pub trait SheetRecord: Serialize + Sized + Send + 'static {
    /// Collection name used in logs and metrics labels.
    const KIND: &'static str;
    /// Cell range holding the data rows (header row excluded).
    const RANGE: SheetRange;
    /// Whether `?limit=` is honoured for this collection.
    const LIMITABLE: bool;

    fn from_row(row: &[String]) -> Self;

    /// Minimal presence checks; records failing them are dropped.
    fn is_valid(&self) -> bool {
        true
    }

    /// Milliseconds since the epoch, or `None` when the date is missing or unparsable.
    fn sort_key(&self) -> Option<i64>;
}

/// Cell at `index`, or `""` when the row is shorter.
pub fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or_default()
}

/// Cell at `index`, `None` when missing or empty.
pub fn optional_cell(row: &[String], index: usize) -> Option<String> {
    let v = cell(row, index);
    (!v.is_empty()).then(|| v.to_string())
}

/// Split a comma separated cell and trim every piece. An empty cell yields no pieces.
pub fn split_list(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',').map(|s| s.trim().to_string()).collect()
}

pub(crate) fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Map every row into `R`.
pub fn map_rows<R: SheetRecord>(rows: &[Vec<String>]) -> Vec<R> {
    rows.iter().map(|r| R::from_row(r)).collect()
}

/// Keep only valid records, preserving order.
pub fn retain_valid<R: SheetRecord>(mut records: Vec<R>) -> Vec<R> {
    records.retain(R::is_valid);
    records
}

#[cfg(test)]
pub(crate) fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}
