// src/records/news.rs
use serde::Serialize;

use super::{cell, SheetRecord};
use crate::dates::parse_news_timestamp;
use crate::sheets::{SheetRange, NEWS_RANGE};

/// News rows are passed through without validity filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    pub published: String,
    pub updated: String,
    pub summary: String,
    pub content: String,
    pub thumbnail: String,
}

impl NewsItem {
    /// `published` when set, otherwise `updated`.
    pub fn effective_date(&self) -> &str {
        if self.published.is_empty() {
            &self.updated
        } else {
            &self.published
        }
    }
}

impl SheetRecord for NewsItem {
    const KIND: &'static str = "news";
    const RANGE: SheetRange = NEWS_RANGE;
    const LIMITABLE: bool = true;

    fn from_row(row: &[String]) -> Self {
        Self {
            title: cell(row, 0).to_string(),
            link: cell(row, 1).to_string(),
            published: cell(row, 2).to_string(),
            updated: cell(row, 3).to_string(),
            summary: cell(row, 4).to_string(),
            content: cell(row, 5).to_string(),
            thumbnail: cell(row, 6).to_string(),
        }
    }

    fn sort_key(&self) -> Option<i64> {
        parse_news_timestamp(self.effective_date())
    }
}
