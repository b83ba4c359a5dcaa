// file: src/repository/classifier.rs
// description: ordered multi-tier classification of changed file paths
// reference: first-match rule evaluation over category rule tables

use crate::config::ClassifierConfig;
use crate::error::{PipelineError, Result};
use crate::models::Category;
use crate::repository::rules::{CategoryRules, builtin_rules};
use regex::Regex;

/// Which signal decided a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    Extension,
    PathSegment,
    Filename,
    Keyword,
}

struct CompiledRules {
    category: Category,
    extensions: Vec<String>,
    path_segments: Vec<String>,
    filenames: Vec<Regex>,
    keywords: Vec<String>,
}

impl CompiledRules {
    fn compile(category: Category, rules: CategoryRules) -> Result<Self> {
        let filenames = rules
            .filenames
            .iter()
            .map(|glob| glob_to_regex(glob))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            category,
            extensions: lowercase_all(rules.extensions),
            path_segments: lowercase_all(rules.path_segments),
            filenames,
            keywords: lowercase_all(rules.keywords),
        })
    }

    fn first_match(&self, path: &str, file_name: &str) -> Option<MatchTier> {
        if self.extensions.iter().any(|ext| file_name.ends_with(ext.as_str())) {
            return Some(MatchTier::Extension);
        }

        if self
            .path_segments
            .iter()
            .any(|segment| contains_segment(path, segment))
        {
            return Some(MatchTier::PathSegment);
        }

        if self.filenames.iter().any(|re| re.is_match(file_name)) {
            return Some(MatchTier::Filename);
        }

        if self.keywords.iter().any(|kw| path.contains(kw.as_str())) {
            return Some(MatchTier::Keyword);
        }

        None
    }
}

pub struct FileClassifier {
    rules: Vec<CompiledRules>,
}

impl FileClassifier {
    /// Classifier over the built-in rule tables.
    pub fn new() -> Self {
        Self::with_rules(builtin_rules()).expect("built-in classification rules compile")
    }

    /// Built-in rule tables with the configured extras appended per category.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self> {
        let rules = builtin_rules()
            .into_iter()
            .map(|(category, mut rules)| {
                rules.extend(config.rules_for(category));
                (category, rules)
            })
            .collect();

        Self::with_rules(rules)
    }

    /// Rule sets are visited in the given order; the first category with a
    /// matching tier wins.
    pub fn with_rules(rules: Vec<(Category, CategoryRules)>) -> Result<Self> {
        let rules = rules
            .into_iter()
            .map(|(category, rules)| CompiledRules::compile(category, rules))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    pub fn classify(&self, path: &str) -> Category {
        self.explain(path)
            .map(|(category, _)| category)
            .unwrap_or_default()
    }

    /// The winning category and the tier that matched, or `None` when the
    /// path falls through to the default.
    pub fn explain(&self, path: &str) -> Option<(Category, MatchTier)> {
        let normalized = path.replace('\\', "/").to_lowercase();
        let file_name = normalized.rsplit('/').next().unwrap_or(normalized.as_str());

        self.rules.iter().find_map(|rules| {
            rules
                .first_match(&normalized, file_name)
                .map(|tier| (rules.category, tier))
        })
    }
}

impl Default for FileClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn lowercase_all(items: Vec<String>) -> Vec<String> {
    items.into_iter().map(|s| s.to_lowercase()).collect()
}

fn contains_segment(path: &str, segment: &str) -> bool {
    path.starts_with(segment) || path.contains(&format!("/{}", segment))
}

fn glob_to_regex(glob: &str) -> Result<Regex> {
    let body = glob
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");

    Regex::new(&format!("(?i)^{}$", body))
        .map_err(|e| PipelineError::Config(format!("Invalid filename pattern {}: {}", glob, e)))
}
