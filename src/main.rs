//! Entry point: parse CLI and dispatch to command handlers.

use anyhow::{Context, Result};
use clap::Parser;
use ffl_engine::{
    cli::{Commands, FflEngine},
    commands::{
        project::handle_project, score::handle_score, validate::handle_validate, CommandContext,
    },
};

/// Run the CLI.
fn main() -> Result<()> {
    let app = FflEngine::parse();
    init_logging(if app.verbose { "debug" } else { "warn" })?;

    let ctx = CommandContext::load(app.config.as_deref()).context("Failed to load engine config")?;

    match app.command {
        Commands::Validate { rules, json } => handle_validate(&ctx, &rules, json)
            .with_context(|| format!("Invalid scoring rules in {}", rules.rules.display()))?,

        Commands::Score {
            rules,
            stats,
            lineup,
            json,
        } => handle_score(&ctx, &rules, &stats, lineup.as_deref(), json)?,

        Commands::Project {
            rules,
            players,
            season,
            week,
            limit,
            json,
        } => handle_project(&ctx, &rules, &players, season, week, limit, json)?,
    }

    Ok(())
}

/// Log to stderr so JSON output on stdout stays clean; `RUST_LOG` wins over `--verbose`.
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
