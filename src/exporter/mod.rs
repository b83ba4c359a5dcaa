// file: src/exporter/mod.rs
// description: result sink trait and json export
// reference: internal module structure

pub mod json;

use crate::error::Result;
use crate::models::ResultSet;
use crate::repository::RepositoryRef;
use std::path::PathBuf;

pub use json::{ExportedCommit, ExportedFile, JsonExporter};

/// Durable storage for a finished run. Called once per run, only after every
/// commit has been fetched and classified.
pub trait ResultSink {
    fn persist(&self, repo: &RepositoryRef, results: &ResultSet) -> Result<PathBuf>;
}
