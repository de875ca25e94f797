//! CLI argument definitions and parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::types::{Season, Week};

/// Where a league's scoring rules come from.
#[derive(Debug, Clone, Args)]
pub struct RulesArgs {
    /// Scoring rules JSON file.
    #[clap(long, short)]
    pub rules: PathBuf,

    /// Rules file is in Yahoo display-name format.
    #[clap(long)]
    pub yahoo: bool,

    /// League key used to cache the compiled rules (defaults to the file name).
    #[clap(long)]
    pub league: Option<String>,
}

impl RulesArgs {
    pub fn league_key(&self) -> String {
        self.league.clone().unwrap_or_else(|| {
            self.rules
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "league".to_string())
        })
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compile a scoring rules file and summarize each rule.
    Validate {
        #[clap(flatten)]
        rules: RulesArgs,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Score stat lines against a league's rules.
    ///
    /// With `--lineup`, prints the team total for the lineup's starters
    /// instead of every stat line.
    Score {
        #[clap(flatten)]
        rules: RulesArgs,

        /// JSON array of stat lines.
        #[clap(long)]
        stats: PathBuf,

        /// JSON array of lineup slots (`player_id`, `slot`, `starting`).
        #[clap(long)]
        lineup: Option<PathBuf>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Project points for an upcoming week and rank the players.
    Project {
        #[clap(flatten)]
        rules: RulesArgs,

        /// JSON array of players with role, injury status and recent stat lines.
        #[clap(long)]
        players: PathBuf,

        /// Season year (e.g. 2025).
        #[clap(long, short, default_value_t = Season::default())]
        season: Season,

        /// Week to project.
        #[clap(long, short)]
        week: Week,

        /// Only print the top N players.
        #[clap(long)]
        limit: Option<usize>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },
}

#[derive(Debug, Parser)]
#[clap(
    name = "ffl-engine",
    about = "Fantasy football scoring and projection engine"
)]
pub struct FflEngine {
    /// Engine config file (or set `FFL_ENGINE_CONFIG`).
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr (`RUST_LOG` overrides).
    #[clap(long, short, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}
