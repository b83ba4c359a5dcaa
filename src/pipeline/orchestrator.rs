// file: src/pipeline/orchestrator.rs
// description: coordinates commit listing, detail fetching, classification and persistence
// reference: orchestrates asynchronous commit history workflow

use crate::client::{GithubClient, HttpTransport, ReqwestTransport, Sleeper, TokioSleeper};
use crate::config::{Config, PipelineConfig};
use crate::error::{PipelineError, Result};
use crate::exporter::ResultSink;
use crate::models::{Category, ChangedFile, CommitRecord, ResultSet};
use crate::pipeline::progress::{ProgressTracker, RunStats};
use crate::repository::{FileClassifier, RepositoryRef};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::future::Future;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Authors listed individually in the final summary.
const TOP_CONTRIBUTORS: usize = 10;

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub output_path: PathBuf,
    pub commits: usize,
    pub stats: RunStats,
}

pub struct PipelineOrchestrator<T = ReqwestTransport, S = TokioSleeper> {
    client: GithubClient<T, S>,
    classifier: FileClassifier,
    max_concurrent_requests: usize,
    show_progress: bool,
    colored: bool,
}

impl PipelineOrchestrator {
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = GithubClient::from_config(&config.github, &config.pipeline)?;
        let classifier = FileClassifier::from_config(&config.classifier)?;
        Ok(Self::new(client, classifier, &config.pipeline))
    }
}

impl<T: HttpTransport, S: Sleeper> PipelineOrchestrator<T, S> {
    pub fn new(client: GithubClient<T, S>, classifier: FileClassifier, config: &PipelineConfig) -> Self {
        Self {
            client,
            classifier,
            max_concurrent_requests: config.parallel_workers.max(1),
            show_progress: config.show_progress,
            colored: true,
        }
    }

    pub fn with_color(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    pub fn client(&self) -> &GithubClient<T, S> {
        &self.client
    }

    /// Fetches and classifies the full history. The first failed commit
    /// aborts the run.
    pub async fn run(&self, repo: &RepositoryRef) -> Result<ResultSet> {
        self.run_with_stats(repo).await.map(|(results, _)| results)
    }

    pub async fn run_with_stats(&self, repo: &RepositoryRef) -> Result<(ResultSet, RunStats)> {
        info!("Starting commit history pipeline for {}", repo);
        if !self.client.is_authenticated() {
            warn!("No GitHub token configured; unauthenticated rate limits apply");
        }

        let commits = self.client.fetch_all_commits(repo).await?;
        if commits.is_empty() {
            warn!("Repository {} has no commits", repo);
        }

        let progress = self.tracker(commits.len());
        info!(
            "Fetching file details for {} commits with {} concurrent request(s)...",
            commits.len(),
            self.max_concurrent_requests
        );

        let client = &self.client;
        let classifier = &self.classifier;
        let tracker = &progress;

        let records: Vec<CommitRecord> = stream::iter(commits.into_iter().map(|summary| async move {
            tracker.set_message(format!("Fetching {}", short_sha(&summary.id)));

            let files = client.fetch_changed_files(repo, &summary.id).await?;
            let files = classify_files(classifier, files);
            tracker.record_commit(&summary.author_name, &files);

            debug!("Classified {} file(s) in {}", files.len(), summary.id);
            Ok::<_, PipelineError>(CommitRecord::new(summary, files))
        }))
        .buffered(self.max_concurrent_requests)
        .try_collect()
        .await?;

        let mut results = ResultSet::new();
        for record in records {
            results.insert(record);
        }

        let stats = progress.get_stats();
        progress.finish();

        Ok((results, stats))
    }

    /// Runs to completion and persists through `sink`. Resolving `shutdown`
    /// first abandons the run with `Interrupted` and nothing is written.
    pub async fn execute<K, F>(
        &self,
        repo: &RepositoryRef,
        sink: &K,
        shutdown: F,
    ) -> Result<RunOutcome>
    where
        K: ResultSink,
        F: Future<Output = ()>,
    {
        let (results, stats) = tokio::select! {
            biased;
            _ = shutdown => {
                warn!("Run for {} interrupted before completion", repo);
                return Err(PipelineError::Interrupted);
            }
            outcome = self.run_with_stats(repo) => outcome?,
        };

        let output_path = sink.persist(repo, &results)?;
        self.log_final_stats(&stats);

        Ok(RunOutcome {
            output_path,
            commits: results.len(),
            stats,
        })
    }

    fn tracker(&self, total_commits: usize) -> ProgressTracker {
        if self.show_progress {
            ProgressTracker::with_color(total_commits, self.colored)
        } else {
            ProgressTracker::hidden(total_commits)
        }
    }

    fn log_final_stats(&self, stats: &RunStats) {
        info!("=== Commit History Summary ===");
        info!("Duration: {} seconds", stats.duration_secs);
        info!("Commits processed: {}", stats.commits_processed);
        info!("Files classified: {}", stats.files_classified);
        for category in Category::ALL {
            info!(
                "  {:<15} {:>6} files ({:5.1}%) {:>9} lines changed",
                category.as_str(),
                stats.files_in(category),
                stats.share(category),
                stats.lines_in(category)
            );
        }
        info!("Total contributors: {}", stats.contributors());

        let (top, others) = stats.top_contributors(TOP_CONTRIBUTORS);
        if !top.is_empty() {
            info!("Top contributors:");
        }
        for (rank, (author, commits)) in top.iter().enumerate() {
            info!(
                "  {:2}. {:<20} {:>6} commits ({:5.1}%)",
                rank + 1,
                author,
                commits,
                stats.commit_share(*commits)
            );
        }
        if others > 0 {
            info!(
                "      {:<20} {:>6} commits ({:5.1}%)",
                "Others",
                others,
                stats.commit_share(others)
            );
        }

        info!("Processing speed: {:.2} commits/sec", stats.commits_per_second());
        info!("==============================");
    }
}

fn classify_files(classifier: &FileClassifier, files: Vec<ChangedFile>) -> Vec<ChangedFile> {
    files
        .into_iter()
        .map(|file| {
            let category = classifier.classify(&file.path);
            file.with_category(category)
        })
        .collect()
}

fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}
