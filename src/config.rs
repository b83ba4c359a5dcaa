// file: src/config.rs
// description: application configuration management with toml and env support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use crate::models::Category;
use crate::repository::CategoryRules;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Largest page size the commits endpoint honours.
pub const MAX_PER_PAGE: u32 = 100;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub github: GithubConfig,
    pub pipeline: PipelineConfig,
    pub output: OutputConfig,
    #[serde(default, skip_serializing_if = "ClassifierConfig::is_empty")]
    pub classifier: ClassifierConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GithubConfig {
    pub api_base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub user_agent: String,
    pub per_page: u32,
    pub page_delay_ms: u64,
    pub computing_backoff_secs: u64,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    pub parallel_workers: usize,
    pub min_request_interval_ms: u64,
    pub show_progress: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub pretty: bool,
}

/// Extra rules appended to the built-in table of each category.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub development: CategoryRules,
    pub test: CategoryRules,
    pub build: CategoryRules,
    pub infrastructure: CategoryRules,
}

impl ClassifierConfig {
    pub fn rules_for(&self, category: Category) -> &CategoryRules {
        match category {
            Category::Development => &self.development,
            Category::Test => &self.test,
            Category::Build => &self.build,
            Category::Infrastructure => &self.infrastructure,
        }
    }

    pub fn is_empty(&self) -> bool {
        Category::ALL
            .iter()
            .all(|category| self.rules_for(*category).is_empty())
    }
}

impl GithubConfig {
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn computing_backoff(&self) -> Duration {
        Duration::from_secs(self.computing_backoff_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl PipelineConfig {
    pub fn min_request_interval(&self) -> Duration {
        Duration::from_millis(self.min_request_interval_ms)
    }
}

impl Config {
    /// Layers built-in defaults, an optional TOML file and `REPO_SCRAPER__*`
    /// environment variables. `GITHUB_TOKEN` fills in the token when no layer
    /// set one.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let defaults = config::Config::try_from(&Self::default_config())
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let mut builder = config::Config::builder().add_source(defaults);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder
                .add_source(config::File::from(Path::new(DEFAULT_CONFIG_PATH)).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("REPO_SCRAPER")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let mut config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        if config.github.token.is_none() {
            config.github.token = std::env::var(TOKEN_ENV_VAR).ok();
        }
        config.github.token = config.github.token.filter(|t| !t.trim().is_empty());

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            github: GithubConfig {
                api_base_url: "https://api.github.com".to_string(),
                token: None,
                user_agent: concat!("repo_scraper/", env!("CARGO_PKG_VERSION")).to_string(),
                per_page: MAX_PER_PAGE,
                page_delay_ms: 100,
                computing_backoff_secs: 3,
                request_timeout_secs: 30,
            },
            pipeline: PipelineConfig {
                parallel_workers: 1,
                min_request_interval_ms: 0,
                show_progress: true,
            },
            output: OutputConfig {
                directory: PathBuf::from("."),
                pretty: true,
            },
            classifier: ClassifierConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.pipeline.parallel_workers == 0 {
            return Err(PipelineError::Config(
                "parallel_workers must be greater than 0".to_string(),
            ));
        }

        if self.github.per_page == 0 || self.github.per_page > MAX_PER_PAGE {
            return Err(PipelineError::Config(format!(
                "per_page must be between 1 and {}",
                MAX_PER_PAGE
            )));
        }

        let base = &self.github.api_base_url;
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(PipelineError::Config(format!(
                "api_base_url must be an http(s) URL: {}",
                base
            )));
        }

        Ok(())
    }
}
