//! Shared loading and output helpers for the command handlers.

use serde::{de::DeserializeOwned, Serialize};
use std::{path::Path, sync::Arc};
use tracing::debug;

use crate::{
    cli::RulesArgs,
    config::EngineConfig,
    core::cache::{ScorerCache, ScorerKey},
    scoring::{parse_yahoo_scoring, CompiledScorer, ScoringSystem},
    Result, Season,
};

/// Resources every command needs: the engine config and a scorer cache
pub struct CommandContext {
    pub config: EngineConfig,
    pub scorers: ScorerCache,
}

impl CommandContext {
    pub fn new(config: EngineConfig) -> Self {
        let scorers = ScorerCache::new(config.scorer_cache_capacity);
        Self { config, scorers }
    }

    /// Load the engine config (explicit path, env var, or default location).
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        Ok(Self::new(EngineConfig::load(config_path)?))
    }

    /// Read a rules file and return the league's compiled scorer.
    pub fn scorer(&self, rules: &RulesArgs, season: Season) -> Result<Arc<CompiledScorer>> {
        let system = load_scoring_system(&rules.rules, rules.yahoo)?;
        let key = ScorerKey::new(rules.league_key(), season);
        debug!(%key, rules = system.len(), "Loading scorer");
        self.scorers.get_or_compile(&key, &system)
    }
}

/// Parse a rules file in the native or Yahoo format.
pub fn load_scoring_system(path: &Path, yahoo: bool) -> Result<ScoringSystem> {
    let contents = std::fs::read_to_string(path)?;
    if yahoo {
        parse_yahoo_scoring(&contents)
    } else {
        ScoringSystem::from_json(&contents)
    }
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Points formatted for text output, with `-0.0` shown as `0.0`.
pub fn format_points(points: f64) -> String {
    let points = if points == 0.0 { 0.0 } else { points };
    format!("{:.2}", points)
}
