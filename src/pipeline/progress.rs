// file: src/pipeline/progress.rs
// description: progress tracking and statistics reporting for pipeline execution
// reference: uses indicatif for progress bars and tracks classification counts

use crate::models::{Category, ChangedFile};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Instant;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStats {
    pub commits_processed: usize,
    pub files_classified: usize,
    pub category_files: [usize; 4],
    pub category_lines: [u64; 4],
    /// Commits per author name, most active first; ties by name.
    pub author_commits: Vec<(String, usize)>,
    pub duration_secs: u64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files_in(&self, category: Category) -> usize {
        self.category_files[category.index()]
    }

    pub fn lines_in(&self, category: Category) -> u64 {
        self.category_lines[category.index()]
    }

    /// Percentage of classified files that fell into `category`.
    pub fn share(&self, category: Category) -> f64 {
        if self.files_classified == 0 {
            return 0.0;
        }
        (self.files_in(category) as f64 / self.files_classified as f64) * 100.0
    }

    pub fn contributors(&self) -> usize {
        self.author_commits.len()
    }

    /// The `limit` most active authors, plus the commit total of everyone
    /// after them.
    pub fn top_contributors(&self, limit: usize) -> (&[(String, usize)], usize) {
        let (top, rest) = self
            .author_commits
            .split_at(limit.min(self.author_commits.len()));
        (top, rest.iter().map(|(_, commits)| commits).sum())
    }

    /// Percentage of processed commits that `commits` represents.
    pub fn commit_share(&self, commits: usize) -> f64 {
        if self.commits_processed == 0 {
            return 0.0;
        }
        (commits as f64 / self.commits_processed as f64) * 100.0
    }

    pub fn commits_per_second(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        self.commits_processed as f64 / self.duration_secs as f64
    }
}

pub struct ProgressTracker {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    commits_processed: AtomicUsize,
    files_classified: AtomicUsize,
    category_files: [AtomicUsize; 4],
    category_lines: [AtomicU64; 4],
    author_commits: Mutex<HashMap<String, usize>>,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(total_commits: usize) -> Self {
        Self::with_color(total_commits, true)
    }

    pub fn with_color(total_commits: usize, colored: bool) -> Self {
        let multi_progress = MultiProgress::new();

        let main_bar = create_progress_bar(&multi_progress, total_commits as u64, colored);
        let detail_bar = create_detail_bar(&multi_progress);

        Self::from_bars(main_bar, detail_bar)
    }

    /// Counts without drawing anything.
    pub fn hidden(total_commits: usize) -> Self {
        let main_bar = ProgressBar::hidden();
        main_bar.set_length(total_commits as u64);
        Self::from_bars(main_bar, ProgressBar::hidden())
    }

    fn from_bars(main_bar: ProgressBar, detail_bar: ProgressBar) -> Self {
        Self {
            main_bar,
            detail_bar,
            commits_processed: AtomicUsize::new(0),
            files_classified: AtomicUsize::new(0),
            category_files: Default::default(),
            category_lines: Default::default(),
            author_commits: Mutex::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    pub fn record_commit(&self, author: &str, files: &[ChangedFile]) {
        if let Ok(mut authors) = self.author_commits.lock() {
            *authors.entry(author.to_string()).or_insert(0) += 1;
        }
        for file in files {
            let index = file.category.unwrap_or_default().index();
            self.category_files[index].fetch_add(1, Ordering::SeqCst);
            self.category_lines[index].fetch_add(file.lines_changed(), Ordering::SeqCst);
        }
        self.files_classified.fetch_add(files.len(), Ordering::SeqCst);
        self.commits_processed.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn set_message(&self, message: String) {
        self.detail_bar.set_message(message);
    }

    pub fn finish(&self) {
        self.main_bar.finish_with_message("Classification complete");
        self.detail_bar.finish_and_clear();
    }

    pub fn get_stats(&self) -> RunStats {
        let mut stats = RunStats {
            commits_processed: self.commits_processed.load(Ordering::SeqCst),
            files_classified: self.files_classified.load(Ordering::SeqCst),
            duration_secs: self.start_time.elapsed().as_secs(),
            ..RunStats::default()
        };

        for (i, counter) in self.category_files.iter().enumerate() {
            stats.category_files[i] = counter.load(Ordering::SeqCst);
        }
        for (i, counter) in self.category_lines.iter().enumerate() {
            stats.category_lines[i] = counter.load(Ordering::SeqCst);
        }

        if let Ok(authors) = self.author_commits.lock() {
            stats.author_commits = authors
                .iter()
                .map(|(name, commits)| (name.clone(), *commits))
                .collect();
        }
        stats
            .author_commits
            .sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        stats
    }

    fn update_detail_bar(&self) {
        let count = |category: Category| self.category_files[category.index()].load(Ordering::SeqCst);

        let message = format!(
            "dev: {} | test: {} | build: {} | infra: {}",
            count(Category::Development),
            count(Category::Test),
            count(Category::Build),
            count(Category::Infrastructure)
        );

        self.detail_bar.set_message(message);
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(multi_progress: &MultiProgress, total: u64, colored: bool) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(total));
    if colored {
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} commits ({eta}) {msg}",
                )
                .expect("Failed to create progress bar template")
                .progress_chars("█▓▒░"),
        );
    } else {
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} commits ({eta}) {msg}")
                .expect("Failed to create progress bar template")
                .progress_chars("=>-"),
        );
    }
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    let style = ProgressStyle::default_bar()
        .template("{msg}")
        .expect("Failed to create detail bar template");
    bar.set_style(style);
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FileStatus;

    fn file(path: &str, added: u64, deleted: u64, category: Category) -> ChangedFile {
        ChangedFile::new(path.to_string(), added, deleted, FileStatus::Modified)
            .with_category(category)
    }

    #[test]
    fn test_run_stats_share() {
        let mut stats = RunStats::new();
        stats.files_classified = 8;
        stats.category_files = [4, 2, 1, 1];

        assert_eq!(stats.share(Category::Development), 50.0);
        assert_eq!(stats.share(Category::Test), 25.0);
        assert_eq!(stats.share(Category::Infrastructure), 12.5);
    }

    #[test]
    fn test_run_stats_zero_values() {
        let stats = RunStats::new();
        assert_eq!(stats.share(Category::Build), 0.0);
        assert_eq!(stats.commits_per_second(), 0.0);
    }

    #[test]
    fn test_tracker_counts_by_category() {
        let tracker = ProgressTracker::hidden(2);

        tracker.record_commit(
            "ada",
            &[
                file("src/lib.rs", 10, 2, Category::Development),
                file("tests/it.rs", 5, 0, Category::Test),
            ],
        );
        tracker.record_commit("ada", &[file("Cargo.toml", 1, 1, Category::Build)]);

        let stats = tracker.get_stats();
        assert_eq!(stats.commits_processed, 2);
        assert_eq!(stats.files_classified, 3);
        assert_eq!(stats.files_in(Category::Development), 1);
        assert_eq!(stats.files_in(Category::Test), 1);
        assert_eq!(stats.files_in(Category::Build), 1);
        assert_eq!(stats.files_in(Category::Infrastructure), 0);
        assert_eq!(stats.lines_in(Category::Development), 12);
        assert_eq!(stats.lines_in(Category::Build), 2);
    }

    #[test]
    fn test_tracker_commit_without_files() {
        let tracker = ProgressTracker::hidden(1);
        tracker.record_commit("ada", &[]);

        let stats = tracker.get_stats();
        assert_eq!(stats.commits_processed, 1);
        assert_eq!(stats.files_classified, 0);
    }

    #[test]
    fn test_contributors_ranked_by_commits() {
        let tracker = ProgressTracker::hidden(6);
        for author in ["bob", "alice", "carol", "alice", "carol", "alice"] {
            tracker.record_commit(author, &[]);
        }

        let stats = tracker.get_stats();
        assert_eq!(stats.contributors(), 3);
        assert_eq!(
            stats.author_commits,
            vec![
                ("alice".to_string(), 3),
                ("carol".to_string(), 2),
                ("bob".to_string(), 1),
            ]
        );
        assert_eq!(stats.commit_share(3), 50.0);
        assert!((stats.commit_share(2) - 33.333).abs() < 0.01);
        assert!((stats.commit_share(1) - 16.667).abs() < 0.01);
    }

    #[test]
    fn test_top_contributors_groups_the_rest() {
        let stats = RunStats {
            commits_processed: 10,
            author_commits: vec![
                ("alice".to_string(), 5),
                ("bob".to_string(), 3),
                ("carol".to_string(), 1),
                ("dave".to_string(), 1),
            ],
            ..RunStats::default()
        };

        let (top, others) = stats.top_contributors(2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[1].0, "bob");
        assert_eq!(others, 2);
        assert_eq!(stats.commit_share(others), 20.0);

        let (all, none) = stats.top_contributors(10);
        assert_eq!(all.len(), 4);
        assert_eq!(none, 0);
    }

    #[test]
    fn test_tied_contributors_sorted_by_name() {
        let tracker = ProgressTracker::hidden(2);
        tracker.record_commit("zed", &[]);
        tracker.record_commit("amy", &[]);

        let names: Vec<String> = tracker
            .get_stats()
            .author_commits
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["amy".to_string(), "zed".to_string()]);
    }
}
