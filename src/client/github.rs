// file: src/client/github.rs
// description: paginated commit listing and per-commit file detail from the GitHub REST API
// reference: https://docs.github.com/en/rest/commits/commits

use crate::client::pacer::{RequestPacer, Sleeper, TokioSleeper};
use crate::client::transport::{HttpResponse, HttpTransport, ReqwestTransport};
use crate::config::{GithubConfig, PipelineConfig};
use crate::error::{PipelineError, Result};
use crate::models::{ChangedFile, CommitSummary, FileStatus};
use crate::repository::RepositoryRef;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

const STATUS_OK: u16 = 200;
const STATUS_ACCEPTED: u16 = 202;
const STATUS_NOT_FOUND: u16 = 404;

#[derive(Debug, Deserialize)]
struct CommitListItem {
    sha: String,
    commit: CommitPayload,
}

#[derive(Debug, Deserialize)]
struct CommitPayload {
    author: GitSignature,
}

#[derive(Debug, Deserialize)]
struct GitSignature {
    name: String,
    date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    #[serde(default)]
    files: Vec<FileEntry>,
}

#[derive(Debug, Deserialize)]
struct FileEntry {
    filename: String,
    additions: u64,
    deletions: u64,
    status: String,
}

impl From<CommitListItem> for CommitSummary {
    fn from(item: CommitListItem) -> Self {
        Self {
            id: item.sha,
            author_name: item.commit.author.name,
            author_date: item.commit.author.date,
        }
    }
}

impl From<FileEntry> for ChangedFile {
    fn from(entry: FileEntry) -> Self {
        ChangedFile::new(
            entry.filename,
            entry.additions,
            entry.deletions,
            FileStatus::from_host(&entry.status),
        )
    }
}

/// Commit API client. Holds the token for its lifetime; every request it
/// issues carries it.
pub struct GithubClient<T = ReqwestTransport, S = TokioSleeper> {
    transport: T,
    sleeper: S,
    pacer: RequestPacer,
    api_base_url: String,
    token: Option<String>,
    per_page: u32,
    page_delay: Duration,
    computing_backoff: Duration,
}

impl GithubClient {
    pub fn from_config(github: &GithubConfig, pipeline: &PipelineConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&github.user_agent, github.request_timeout())?;

        Ok(Self::new(github, transport, TokioSleeper)
            .with_pacer(RequestPacer::new(pipeline.min_request_interval())))
    }
}

impl<T: HttpTransport, S: Sleeper> GithubClient<T, S> {
    pub fn new(config: &GithubConfig, transport: T, sleeper: S) -> Self {
        Self {
            transport,
            sleeper,
            pacer: RequestPacer::unlimited(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            per_page: config.per_page,
            page_delay: config.page_delay(),
            computing_backoff: config.computing_backoff(),
        }
    }

    pub fn with_pacer(mut self, pacer: RequestPacer) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn commits_url(&self, repo: &RepositoryRef, page: u32) -> String {
        format!(
            "{}/repos/{}/{}/commits?page={}&per_page={}",
            self.api_base_url,
            repo.owner(),
            repo.name(),
            page,
            self.per_page
        )
    }

    pub fn commit_url(&self, repo: &RepositoryRef, sha: &str) -> String {
        format!(
            "{}/repos/{}/{}/commits/{}",
            self.api_base_url,
            repo.owner(),
            repo.name(),
            sha
        )
    }

    /// Every commit summary, in the order the API lists them.
    pub async fn fetch_all_commits(&self, repo: &RepositoryRef) -> Result<Vec<CommitSummary>> {
        info!("Fetching commits from {}", repo);

        let mut commits = Vec::new();
        let mut page = 1;

        loop {
            let batch = self.fetch_commit_page(repo, page).await?;
            let received = batch.len();
            commits.extend(batch);

            info!(
                "Fetched page {} - {} commits (total: {})",
                page,
                received,
                commits.len()
            );

            if received < self.per_page as usize {
                break;
            }

            page += 1;
            self.sleeper.sleep(self.page_delay).await;
        }

        info!("Fetched {} commits in {} page(s)", commits.len(), page);
        Ok(commits)
    }

    pub async fn fetch_commit_page(
        &self,
        repo: &RepositoryRef,
        page: u32,
    ) -> Result<Vec<CommitSummary>> {
        let url = self.commits_url(repo, page);
        let response = self.get_settled(&url).await?;

        if response.status != STATUS_OK {
            return Err(network_error(url, response));
        }

        let items: Vec<CommitListItem> = decode(&url, &response.body)?;
        Ok(items.into_iter().map(CommitSummary::from).collect())
    }

    /// Files touched by one commit, left unclassified.
    pub async fn fetch_changed_files(
        &self,
        repo: &RepositoryRef,
        sha: &str,
    ) -> Result<Vec<ChangedFile>> {
        let url = self.commit_url(repo, sha);
        let response = self.get_settled(&url).await?;

        match response.status {
            STATUS_OK => {
                let detail: CommitDetail = decode(&url, &response.body)?;
                debug!("Commit {} changed {} file(s)", sha, detail.files.len());
                Ok(detail.files.into_iter().map(ChangedFile::from).collect())
            }
            STATUS_NOT_FOUND => Err(PipelineError::NotFound { url }),
            _ => Err(network_error(url, response)),
        }
    }

    /// Repeats the request while the host answers 202, waiting the computing
    /// backoff between attempts. There is no attempt limit.
    async fn get_settled(&self, url: &str) -> Result<HttpResponse> {
        let mut attempt = 1u32;

        loop {
            self.pacer.acquire(&self.sleeper).await;
            let response = self.transport.get(url, self.token.as_deref()).await?;

            if let Some(remaining) = response.rate_limit_remaining {
                debug!("Rate limit remaining: {}", remaining);
                if remaining == 0 {
                    warn!("Rate limit exhausted; further requests will be rejected until reset");
                }
            }

            if response.status != STATUS_ACCEPTED {
                return Ok(response);
            }

            info!(
                "GitHub is still computing {} (attempt {}), retrying in {}s",
                url,
                attempt,
                self.computing_backoff.as_secs()
            );
            attempt += 1;
            self.sleeper.sleep(self.computing_backoff).await;
        }
    }
}

fn network_error(url: String, response: HttpResponse) -> PipelineError {
    PipelineError::Network {
        url,
        status: response.status,
        body: response.body,
    }
}

fn decode<D: DeserializeOwned>(url: &str, body: &str) -> Result<D> {
    serde_json::from_str(body).map_err(|e| PipelineError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}
