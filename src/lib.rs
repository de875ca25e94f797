//! Fantasy Football Scoring and Projection Engine
//!
//! Turns a league's scoring rules and players' weekly stat lines into
//! fantasy points, and projects the points a player should score in an
//! upcoming week from recent output, depth-chart role and injury status.
//!
//! ## Features
//!
//! - **Scoring Rules**: Per-unit, threshold and tiered rules with optional
//!   caps, compiled once per league and reused for every stat line
//! - **Yahoo Import**: Read Yahoo display-name scoring settings
//! - **Lineup Totals**: Team points for a set of starters
//! - **Projections**: Recency-weighted averages adjusted for role and
//!   injury, with a confidence score and a replacement-level fallback
//! - **Batch Work**: Score or project many players in parallel
//!
//! ## Quick Start
//!
//! ```rust
//! use ffl_engine::{
//!     compile, project, PlayerId, Position, ProjectionConfig, ProjectionInput,
//!     ScoringRule, ScoringSystem, Season, StatLine, Week,
//! };
//!
//! # fn example() -> ffl_engine::Result<()> {
//! let scorer = compile(
//!     &ScoringSystem::new()
//!         .with_rule("receptions", ScoringRule::per_unit(1.0))
//!         .with_rule("receiving_yards", ScoringRule::per_unit(0.1)),
//! )?;
//!
//! let week_one = StatLine::new(PlayerId::new("wr1"), Season::new(2024), Week::new(1))
//!     .with_stat("receptions", 6.0)
//!     .with_stat("receiving_yards", 85.0);
//! assert!((scorer.score(&week_one).total - 14.5).abs() < 1e-9);
//!
//! let input = ProjectionInput::new(PlayerId::new("wr1"), Position::WR, Season::new(2024))
//!     .with_scored_history(&scorer, &[week_one]);
//! let projection = project(&input, Week::new(2), &ProjectionConfig::default())?;
//! assert!(projection.projected_points > 0.0);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Environment Configuration
//!
//! Point the CLI at an engine config file instead of the default location:
//! ```bash
//! export FFL_ENGINE_CONFIG=~/leagues/engine.json
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod projection;
pub mod scoring;
pub mod types;

// Re-export commonly used types
pub use config::EngineConfig;
pub use error::{EngineError, Result};
pub use projection::{
    project, project_batch, rank_projections, ProjectionBasis, ProjectionConfig, ProjectionInput,
    ProjectionResult, WeeklyPoints,
};
pub use scoring::{
    compile, parse_yahoo_scoring, CompiledScorer, FantasyPointsResult, ScoringRule, ScoringSystem,
    StatLine, TierBand, TierMode,
};
pub use types::{InjuryStatus, PlayerId, Position, Season, Week};

pub const CONFIG_PATH_ENV_VAR: &str = "FFL_ENGINE_CONFIG";
