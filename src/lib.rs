// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns

pub mod client;
pub mod config;
pub mod error;
pub mod exporter;
pub mod models;
pub mod pipeline;
pub mod repository;
pub mod utils;

pub use client::{GithubClient, HttpTransport, ReqwestTransport, RequestPacer};
pub use config::{ClassifierConfig, Config, GithubConfig, OutputConfig, PipelineConfig};
pub use error::{PipelineError, Result};
pub use exporter::{ExportedCommit, ExportedFile, JsonExporter, ResultSink};
pub use models::{Category, ChangedFile, CommitRecord, CommitSummary, FileStatus, ResultSet};
pub use pipeline::{PipelineOrchestrator, ProgressTracker, RunOutcome, RunStats};
pub use repository::{FileClassifier, RepositoryRef};
