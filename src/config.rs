//! Engine configuration file
//!
//! Read from `$FFL_ENGINE_CONFIG` when set, otherwise from
//! `<config_dir>/ffl-engine/config.json`. A missing file means defaults.
//!
//! ```json
//! {
//!   "projection": {"recencyWindow": 4, "decayRate": 0.6},
//!   "replacementBaselines": {"QB": 14.0, "RB": 7.5},
//!   "scorerCacheCapacity": 32
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::files::{default_config_path, try_read_to_string};
use crate::error::{EngineError, Result};
use crate::projection::ProjectionConfig;
use crate::types::Position;
use crate::CONFIG_PATH_ENV_VAR;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub projection: ProjectionConfig,
    /// Points a freely available player is expected to score, per position
    pub replacement_baselines: BTreeMap<Position, f64>,
    pub scorer_cache_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            projection: ProjectionConfig::default(),
            replacement_baselines: BTreeMap::from([
                (Position::QB, 14.0),
                (Position::RB, 7.0),
                (Position::WR, 7.0),
                (Position::TE, 5.0),
                (Position::K, 6.0),
                (Position::DEF, 5.0),
            ]),
            scorer_cache_capacity: 32,
        }
    }
}

impl EngineConfig {
    /// Where the config is read from: the env var override or the default path.
    pub fn resolve_path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(default_config_path)
    }

    /// Load from an explicit path, the env var, or the default location.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            // An explicitly requested file must exist.
            Some(path) => Self::from_json(&std::fs::read_to_string(path)?),
            None => Self::load_from(&Self::resolve_path()),
        }
    }

    /// Load from `path`, falling back to defaults if it cannot be read.
    pub fn load_from(path: &Path) -> Result<Self> {
        match try_read_to_string(path) {
            Some(contents) => Self::from_json(&contents),
            None => {
                debug!(path = %path.display(), "No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.projection.validate()?;
        for (position, baseline) in &self.replacement_baselines {
            if !position.is_projectable() {
                return Err(EngineError::configuration(
                    "replacementBaselines",
                    format!("{} is a lineup slot, not a player position", position),
                ));
            }
            if !baseline.is_finite() {
                return Err(EngineError::configuration(
                    "replacementBaselines",
                    format!("baseline for {} must be finite", position),
                ));
            }
        }
        Ok(())
    }

    /// Replacement baseline for a position, 0.0 if none is configured.
    pub fn baseline_for(&self, position: Position) -> f64 {
        self.replacement_baselines
            .get(&position)
            .copied()
            .unwrap_or(0.0)
    }
}
