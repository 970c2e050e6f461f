// src/listing.rs
//! Ordering and truncation of mapped records.

use std::cmp::Reverse;

use crate::error::ApiError;
use crate::records::SheetRecord;

/// Newest first. Records without a valid date keep their relative order at the end.
pub fn sort_newest_first<R: SheetRecord>(mut records: Vec<R>) -> Vec<R> {
    records.sort_by_cached_key(|r| {
        let key = r.sort_key();
        (key.is_none(), Reverse(key))
    });
    records
}

/// Parsed `?limit=` query value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Limit {
    #[default]
    All,
    First(usize),
}

impl Limit {
    /// Absent or blank means no limit; otherwise a non-negative decimal integer is required.
    pub fn parse(raw: Option<&str>) -> Result<Self, ApiError> {
        let Some(raw) = raw else {
            return Ok(Limit::All);
        };
        let t = raw.trim();
        if t.is_empty() {
            return Ok(Limit::All);
        }
        if !t.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ApiError::InvalidLimit(raw.to_string()));
        }
        // All digits, so the only failure left is overflow: treat as "more than we have".
        Ok(Limit::First(t.parse::<usize>().unwrap_or(usize::MAX)))
    }

    pub fn apply<T>(self, mut items: Vec<T>) -> Vec<T> {
        if let Limit::First(n) = self {
            items.truncate(n);
        }
        items
    }
}
