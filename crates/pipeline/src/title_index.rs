//! Case-insensitive title lookup.
//!
//! Titles are not unique. When two rows share a lowercased title the later
//! row wins, so "Clone" resolves to whichever "Clone" was loaded last.

use data_loader::Row;
use std::collections::HashMap;

/// Default number of suggestions returned by [`TitleIndex::suggest`]
pub const DEFAULT_SUGGESTIONS: usize = 8;

fn normalize(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Maps lowercased titles to corpus rows.
#[derive(Debug, Clone, Default)]
pub struct TitleIndex {
    rows: HashMap<String, Row>,
    titles: Vec<String>,
}

impl TitleIndex {
    /// Build from titles in row order.
    pub fn build<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = Self::default();
        for (row, title) in titles.into_iter().enumerate() {
            let title = title.into();
            // later rows overwrite earlier ones
            index.rows.insert(normalize(&title), row);
            index.titles.push(title);
        }
        index
    }

    /// Row for a query title, ignoring case and surrounding whitespace
    pub fn resolve(&self, query: &str) -> Option<Row> {
        self.rows.get(&normalize(query)).copied()
    }

    /// Distinct titles containing `fragment` (case-insensitive), in row order.
    pub fn suggest(&self, fragment: &str, limit: usize) -> Vec<&str> {
        let needle = normalize(fragment);
        if needle.is_empty() {
            return Vec::new();
        }

        let mut suggestions: Vec<&str> = Vec::new();
        for title in &self.titles {
            if suggestions.len() >= limit {
                break;
            }
            if title.to_lowercase().contains(&needle) && !suggestions.contains(&title.as_str()) {
                suggestions.push(title);
            }
        }
        suggestions
    }

    /// Number of distinct lowercased titles
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
