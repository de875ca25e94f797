//! Fantasy scoring engine
//!
//! Turns a league's declarative scoring rules into a [`CompiledScorer`] that
//! maps a player's raw per-game statistics to fantasy points:
//! - `rules`: the rule shapes as synced from the fantasy platform
//! - `stats`: raw stat lines and scoring results
//! - `compile`: validation, rule resolution and per-line scoring
//! - `lineup`: team totals over a week's starting lineup
//! - `yahoo`: import of Yahoo-style scoring settings

pub mod compile;
pub mod lineup;
pub mod rules;
pub mod stats;
pub mod yahoo;

pub use compile::{compile, CompiledRule, CompiledScorer, RuleKind};
pub use lineup::{LineupSlot, PlayerPoints, TeamPointsResult};
pub use rules::{ScoringRule, ScoringSystem, TierBand, TierMode};
pub use stats::{FantasyPointsResult, StatLine};
pub use yahoo::parse_yahoo_scoring;
