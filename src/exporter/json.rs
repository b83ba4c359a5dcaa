// file: src/exporter/json.rs
// description: json export of classified commit history keyed by sha

use crate::error::{PipelineError, Result};
use crate::exporter::ResultSink;
use crate::models::{Category, ChangedFile, CommitRecord, ResultSet};
use crate::repository::RepositoryRef;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
    pretty: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedFile {
    pub filename: String,
    pub lines_changed: u64,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedCommit {
    pub sha: String,
    #[serde(rename = "Author")]
    pub author: String,
    #[serde(rename = "Date")]
    pub date: DateTime<Utc>,
    #[serde(rename = "Files")]
    pub files: Vec<ExportedFile>,
}

impl From<&ChangedFile> for ExportedFile {
    fn from(file: &ChangedFile) -> Self {
        Self {
            filename: file.path.clone(),
            lines_changed: file.lines_changed(),
            category: file.category.unwrap_or_default(),
        }
    }
}

impl From<&CommitRecord> for ExportedCommit {
    fn from(record: &CommitRecord) -> Self {
        Self {
            sha: record.id.clone(),
            author: record.author.clone(),
            date: record.date,
            files: record.files.iter().map(ExportedFile::from).collect(),
        }
    }
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>, pretty: bool) -> Self {
        Self {
            output_dir: output_dir.into(),
            pretty,
        }
    }

    /// `{output_dir}/{name}.json`
    pub fn output_path(&self, repo: &RepositoryRef) -> PathBuf {
        self.output_dir.join(format!("{}.json", repo.name()))
    }

    pub fn render(&self, results: &ResultSet) -> Result<String> {
        let document: IndexMap<&str, ExportedCommit> = results
            .records()
            .map(|record| (record.id.as_str(), ExportedCommit::from(record)))
            .collect();

        let rendered = if self.pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };

        Ok(rendered)
    }

    /// Reads a previously written document back, keeping its key order.
    pub fn read(path: &Path) -> Result<IndexMap<String, ExportedCommit>> {
        let content = fs::read_to_string(path).map_err(|source| PipelineError::FileOperation {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(serde_json::from_str(&content)?)
    }
}

impl ResultSink for JsonExporter {
    fn persist(&self, repo: &RepositoryRef, results: &ResultSet) -> Result<PathBuf> {
        let rendered = self.render(results)?;

        fs::create_dir_all(&self.output_dir).map_err(|source| PipelineError::FileOperation {
            path: self.output_dir.clone(),
            source,
        })?;

        let path = self.output_path(repo);
        fs::write(&path, rendered).map_err(|source| PipelineError::FileOperation {
            path: path.clone(),
            source,
        })?;

        info!("Wrote {} commits to {}", results.len(), path.display());
        Ok(path)
    }
}
