// file: src/utils/logging.rs
// description: stderr tracing subscriber and colored console status lines

use colored::*;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Directive used when `RUST_LOG` is unset. Dependencies stay at warn so
/// reqwest and hyper chatter does not drown the run log.
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "warn,repo_scraper=debug"
    } else {
        "warn,repo_scraper=info"
    }
}

/// Logs go to stderr; stdout carries only the step and result lines.
/// `colored_output = false` also turns off the console status colors.
pub fn init_logger(colored_output: bool, verbose: bool) {
    if !colored_output {
        colored::control::set_override(false);
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .compact()
        .with_ansi(colored_output);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub fn format_success(msg: &str) -> String {
    format!("{} {}", "✓".green().bold(), msg.green())
}

pub fn format_error(msg: &str) -> String {
    format!("{} {}", "✗".red().bold(), msg.red())
}

pub fn format_warning(msg: &str) -> String {
    format!("{} {}", "⚠".yellow().bold(), msg.yellow())
}

pub fn format_step(step: usize, total: usize, msg: &str) -> String {
    format!("{} {}", format!("[{}/{}]", step, total).cyan().bold(), msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_scopes_debug_to_crate() {
        assert_eq!(default_directive(false), "warn,repo_scraper=info");
        assert_eq!(default_directive(true), "warn,repo_scraper=debug");
    }

    #[test]
    fn test_status_lines_keep_message() {
        colored::control::set_override(false);
        assert_eq!(format_step(2, 3, "Fetching"), "[2/3] Fetching");
        assert_eq!(format_success("done"), "✓ done");
        assert_eq!(format_error("failed"), "✗ failed");
        assert_eq!(format_warning("careful"), "⚠ careful");
    }
}
