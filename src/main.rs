// file: src/main.rs
// description: commandline application entry point
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use repo_scraper::utils::logging::{format_error, format_step, format_success, format_warning};
use repo_scraper::{Config, JsonExporter, PipelineError, PipelineOrchestrator, RepositoryRef};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "repo_scraper")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(
    about = "Fetch a GitHub repository's commit history and classify every changed file",
    long_about = None
)]
struct Cli {
    /// Repository URL (https or ssh) or `owner/name`
    #[arg(value_name = "REPOSITORY")]
    repository: String,

    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// GitHub token; overrides every configured token
    #[arg(long, value_name = "TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    #[arg(short, long, value_name = "NUM")]
    workers: Option<usize>,

    #[arg(long, action = ArgAction::SetTrue)]
    compact: bool,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[arg(long, action = ArgAction::SetTrue)]
    no_progress: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    repo_scraper::utils::logging::init_logger(cli.color, cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<PipelineError>() {
                Some(PipelineError::Interrupted) => {
                    eprintln!("{}", format_warning("Interrupted; no output was written"));
                }
                _ => {
                    error!("{:#}", err);
                    eprintln!("{}", format_error(&format!("{:#}", err)));
                }
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    info!("Repo Scraper commit history pipeline");

    println!("{}", format_step(1, 2, "Loading configuration"));
    let config = load_config(&cli)?;

    let repo = RepositoryRef::parse(&cli.repository)?;

    println!(
        "{}",
        format_step(2, 2, &format!("Fetching, classifying and writing {}", repo))
    );
    let orchestrator = PipelineOrchestrator::from_config(&config)
        .context("Failed to create GitHub client")?
        .with_color(cli.color);
    let exporter = JsonExporter::new(&config.output.directory, config.output.pretty);

    let outcome = orchestrator
        .execute(&repo, &exporter, shutdown_signal())
        .await?;

    println!(
        "{}",
        format_success(&format!(
            "{} commits written to {}",
            outcome.commits,
            outcome.output_path.display()
        ))
    );

    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            Config::load(Some(path.as_path())).context("Failed to load configuration")?
        }
        None => Config::load(None).context("Failed to load configuration")?,
    };

    if let Some(token) = cli.token.as_deref().filter(|t| !t.trim().is_empty()) {
        config.github.token = Some(token.to_string());
    }
    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.clone();
    }
    if let Some(workers) = cli.workers {
        config.pipeline.parallel_workers = workers;
    }
    if cli.compact {
        config.output.pretty = false;
    }
    if cli.no_progress {
        config.pipeline.show_progress = false;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Resolves on ctrl-c. Never resolves if the handler cannot be installed.
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("repo_scraper").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_flags_override_loaded_config() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("reports");
        let cli = parse(&[
            "octo/widgets",
            "--token",
            "cli-token",
            "--output-dir",
            out.to_str().unwrap(),
            "--workers",
            "4",
            "--compact",
            "--no-progress",
        ]);

        let config = load_config(&cli).unwrap();
        assert_eq!(config.github.token.as_deref(), Some("cli-token"));
        assert_eq!(config.output.directory, out);
        assert_eq!(config.pipeline.parallel_workers, 4);
        assert!(!config.output.pretty);
        assert!(!config.pipeline.show_progress);
    }

    #[test]
    fn test_zero_workers_flag_rejected() {
        let cli = parse(&["octo/widgets", "--workers", "0"]);
        assert!(load_config(&cli).is_err());
    }

    #[test]
    fn test_repository_is_required() {
        assert!(Cli::try_parse_from(["repo_scraper"]).is_err());
    }
}
