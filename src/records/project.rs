// src/records/project.rs
use serde::Serialize;

use super::{cell, is_blank, optional_cell, split_list, SheetRecord};
use crate::dates::parse_locale_date;
use crate::sheets::{SheetRange, PROJECTS_RANGE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    pub authors: Vec<String>,
    pub date: String,
    pub technologies: Vec<String>,
    pub youtube_url: Option<String>,
    pub description: String,
    pub deploy_link: Option<String>,
    pub github_link: Option<String>,
    pub article_link: Option<String>,
}

impl SheetRecord for Project {
    const KIND: &'static str = "projects";
    const RANGE: SheetRange = PROJECTS_RANGE;
    const LIMITABLE: bool = false;

    // columns: title | authors | date | technologies | youtube | description | deploy | github | article
    fn from_row(row: &[String]) -> Self {
        let mut authors = split_list(cell(row, 1));
        authors.retain(|a| !a.is_empty());

        Self {
            title: cell(row, 0).to_string(),
            authors,
            date: cell(row, 2).to_string(),
            technologies: split_list(cell(row, 3)),
            youtube_url: optional_cell(row, 4),
            description: cell(row, 5).to_string(),
            deploy_link: optional_cell(row, 6),
            github_link: optional_cell(row, 7),
            article_link: optional_cell(row, 8),
        }
    }

    fn is_valid(&self) -> bool {
        !is_blank(&self.title) && !self.authors.is_empty()
    }

    fn sort_key(&self) -> Option<i64> {
        parse_locale_date(&self.date)
    }
}
