// src/sheets/mod.rs
//! Upstream spreadsheet access: the value-range wire type and the source abstraction.

pub mod client;

pub use client::GoogleSheetsClient;

use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::SheetCredentials;
use crate::error::ApiResult;

/// First data row; row 1 is the header and is never read.
pub const FIRST_DATA_ROW: u32 = 2;

pub const ACHIEVEMENTS_RANGE: SheetRange = SheetRange::new("Achievements", "D");
pub const NEWS_RANGE: SheetRange = SheetRange::new("NewsList", "G");
pub const PROJECTS_RANGE: SheetRange = SheetRange::new("Projects", "I");

/// Columns `A..=last_column` of `sheet`, from [`FIRST_DATA_ROW`] to the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetRange {
    pub sheet: &'static str,
    pub last_column: &'static str,
}

impl SheetRange {
    pub const fn new(sheet: &'static str, last_column: &'static str) -> Self {
        Self { sheet, last_column }
    }
}

impl fmt::Display for SheetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}!A{}:{}", self.sheet, FIRST_DATA_ROW, self.last_column)
    }
}

/// Body of a `values.get` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default)]
    pub values: Option<Vec<Vec<String>>>,
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub major_dimension: Option<String>,
}

impl ValueRange {
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self {
            values: Some(rows),
            ..Self::default()
        }
    }

    /// Data rows; empty when the range has none.
    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.values.unwrap_or_default()
    }
}

/// Error body returned by the spreadsheet service on failure.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamErrorBody {
    pub error: UpstreamErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamErrorDetail {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub status: String,
}

/// Anything that can return raw rows for a range.
#[async_trait]
pub trait SheetSource: Send + Sync {
    async fn fetch_values(
        &self,
        creds: &SheetCredentials,
        range: SheetRange,
    ) -> ApiResult<ValueRange>;

    fn name(&self) -> &'static str;
}
