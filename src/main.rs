mod action;
mod config;
mod github;
mod label;
mod pr;
mod report;
mod size;

use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use action::{ActionError, Target};

/// pr-size — GitHub Action that labels a pull request with its size
/// (size/XS … size/XXL) based on the number of changed lines.
#[derive(Parser, Debug)]
#[command(name = "pr-size", version, about)]
struct Cli {
    /// Config file (defaults to .pr-size.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Label this pull request instead of the one from the triggering event
    /// (e.g., https://github.com/org/repo/pull/42)
    #[arg(long, value_name = "URL")]
    pr: Option<String>,

    /// Append a Markdown summary to this file (defaults to GITHUB_STEP_SUMMARY)
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let in_actions = std::env::var("GITHUB_ACTIONS").is_ok_and(|value| value == "true");

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "could not process the pull request");
            if in_actions {
                report::annotate_failure(&err.to_string());
            }
            eprintln!("{} {}", "error:".red().bold(), err);
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<(), ActionError> {
    info!("loading configuration");
    let mut config = config::Config::load(cli.config.as_deref())?;
    if cli.summary.is_some() {
        config.report.summary_path = cli.summary;
    }
    debug!(api_url = config.api_url(), authenticated = config.github_token().is_some(), "loaded configuration");

    let target = match cli.pr {
        Some(url) => Target::Url(url),
        None => Target::Event,
    };
    let pull_request = action::resolve_target(&target, &config)?;
    info!(owner = %pull_request.owner, repo = %pull_request.repo, number = pull_request.number, "successfully read the target pull request");

    let client = action::client(&config)?;
    let outcome = action::run(&client, pull_request).await?;

    report::output(&outcome, config.report.summary_path.as_deref())?;
    info!(size = %outcome.size, "done");
    Ok(())
}
