// src/records/achievement.rs
use serde::Serialize;

use super::{cell, is_blank, SheetRecord};
use crate::dates::parse_locale_date;
use crate::sheets::{SheetRange, ACHIEVEMENTS_RANGE};

/// Cell value marking an achievement that received an award.
pub const AWARD_MARK: &str = "有";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub date: String,
    pub title: String,
    pub summary: String,
    pub has_award: bool,
}

impl SheetRecord for Achievement {
    const KIND: &'static str = "achievements";
    const RANGE: SheetRange = ACHIEVEMENTS_RANGE;
    const LIMITABLE: bool = true;

    // columns: date | title | summary | award
    fn from_row(row: &[String]) -> Self {
        Self {
            date: cell(row, 0).to_string(),
            title: cell(row, 1).to_string(),
            summary: cell(row, 2).to_string(),
            has_award: cell(row, 3) == AWARD_MARK,
        }
    }

    fn is_valid(&self) -> bool {
        !is_blank(&self.date) && !is_blank(&self.title) && !is_blank(&self.summary)
    }

    fn sort_key(&self) -> Option<i64> {
        parse_locale_date(&self.date)
    }
}
