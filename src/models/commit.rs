// file: src/models/commit.rs
// description: commit summaries, changed files and the keyed result set
// reference: github commits api payloads

use crate::models::Category;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    pub id: String,
    pub author_name: String,
    pub author_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Modified,
    Removed,
    Renamed,
}

impl FileStatus {
    /// Folds the host's status vocabulary onto the four tracked states.
    pub fn from_host(status: &str) -> Self {
        match status {
            "added" | "copied" => FileStatus::Added,
            "removed" => FileStatus::Removed,
            "renamed" => FileStatus::Renamed,
            _ => FileStatus::Modified,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    pub path: String,
    pub lines_added: u64,
    pub lines_deleted: u64,
    pub status: FileStatus,
    pub category: Option<Category>,
}

impl ChangedFile {
    pub fn new(path: String, lines_added: u64, lines_deleted: u64, status: FileStatus) -> Self {
        Self {
            path,
            lines_added,
            lines_deleted,
            status,
            category: None,
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn lines_changed(&self) -> u64 {
        self.lines_added + self.lines_deleted
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub id: String,
    pub author: String,
    pub date: DateTime<Utc>,
    pub files: Vec<ChangedFile>,
}

impl CommitRecord {
    pub fn new(summary: CommitSummary, files: Vec<ChangedFile>) -> Self {
        Self {
            id: summary.id,
            author: summary.author_name,
            date: summary.author_date,
            files,
        }
    }
}

/// Commit records keyed by id, iterated in insertion order.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    records: IndexMap<String, CommitRecord>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A duplicate id replaces the earlier record in place.
    pub fn insert(&mut self, record: CommitRecord) {
        self.records.insert(record.id.clone(), record);
    }

    pub fn get(&self, id: &str) -> Option<&CommitRecord> {
        self.records.get(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn records(&self) -> impl Iterator<Item = &CommitRecord> {
        self.records.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn summary(id: &str, author: &str) -> CommitSummary {
        CommitSummary {
            id: id.to_string(),
            author_name: author.to_string(),
            author_date: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_host_status_folding() {
        assert_eq!(FileStatus::from_host("added"), FileStatus::Added);
        assert_eq!(FileStatus::from_host("copied"), FileStatus::Added);
        assert_eq!(FileStatus::from_host("removed"), FileStatus::Removed);
        assert_eq!(FileStatus::from_host("renamed"), FileStatus::Renamed);
        assert_eq!(FileStatus::from_host("modified"), FileStatus::Modified);
        assert_eq!(FileStatus::from_host("changed"), FileStatus::Modified);
        assert_eq!(FileStatus::from_host("unchanged"), FileStatus::Modified);
    }

    #[test]
    fn test_changed_file_starts_unclassified() {
        let file = ChangedFile::new("src/lib.rs".to_string(), 10, 4, FileStatus::Modified);
        assert_eq!(file.category, None);
        assert_eq!(file.lines_changed(), 14);

        let file = file.with_category(Category::Development);
        assert_eq!(file.category, Some(Category::Development));
    }

    #[test]
    fn test_result_set_keeps_insertion_order() {
        let mut results = ResultSet::new();
        results.insert(CommitRecord::new(summary("c3", "carol"), vec![]));
        results.insert(CommitRecord::new(summary("a1", "alice"), vec![]));
        results.insert(CommitRecord::new(summary("b2", "bob"), vec![]));

        let ids: Vec<&str> = results.ids().collect();
        assert_eq!(ids, vec!["c3", "a1", "b2"]);
    }

    #[test]
    fn test_result_set_duplicate_id_overwrites() {
        let mut results = ResultSet::new();
        results.insert(CommitRecord::new(summary("a1", "alice"), vec![]));
        results.insert(CommitRecord::new(summary("b2", "bob"), vec![]));
        results.insert(CommitRecord::new(summary("a1", "mallory"), vec![]));

        assert_eq!(results.len(), 2);
        assert_eq!(results.get("a1").unwrap().author, "mallory");
        assert_eq!(results.ids().next(), Some("a1"));
    }
}
