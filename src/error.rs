// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(
        "Invalid repository reference '{0}': expected https://host/owner/name, git@host:owner/name or owner/name"
    )]
    InvalidReference(String),

    #[error("Request to {url} failed with status {status}: {body}")]
    Network {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Request to {url} could not be completed: {message}")]
    Transport { url: String, message: String },

    #[error("Not found: {url}")]
    NotFound { url: String },

    #[error("Unexpected response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Interrupted by user")]
    Interrupted,

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PipelineError {
    /// True for failures that came from talking to the remote host.
    pub fn is_network_failure(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Transport { .. })
    }
}
