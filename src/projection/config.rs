//! Tuning options for the projection heuristic.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::types::Position;

/// Named constants driving [`project`](super::project).
///
/// Serialized with camelCase keys (`recencyWindow`, `decayRate`, ...); any
/// omitted key takes its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectionConfig {
    /// Number of most recent games averaged
    pub recency_window: usize,
    /// Role multiplier is `decay_rate^(rank - 1)`
    pub decay_rate: f64,
    /// Injury multiplier for questionable players
    pub questionable_discount: f64,
    /// Confidence lost when fewer than `recency_window` games are available
    pub low_data_penalty: f64,
    /// Confidence lost for any non-active injury status
    pub injury_penalty: f64,
    /// Confidence lost when depth-chart rank exceeds `depth_threshold`
    pub depth_penalty: f64,
    pub confidence_floor: f64,
    pub depth_threshold: u32,
    /// Positions averaged with equal weights instead of recency weights
    pub uniform_weight_positions: Vec<Position>,
    /// Share of the usage multiplier driven by snap share:
    /// `1 - w + w * snap_share`
    pub snap_share_weight: f64,
    /// Matchup multiplier against the defense ranked 1 (the softest)
    pub best_matchup_multiplier: f64,
    /// Matchup multiplier against the defense ranked last
    pub worst_matchup_multiplier: f64,
    /// Multiplier for the top-ranked scoring offense
    pub best_offense_multiplier: f64,
    /// Multiplier for the lowest-ranked scoring offense
    pub worst_offense_multiplier: f64,
    /// Number of ranked teams; ranks run from 1 to this value
    pub team_count: u32,
    /// Positions whose matchup comes from their own team's scoring offense
    /// rather than the opposing defense
    pub offense_rank_positions: Vec<Position>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            recency_window: 4,
            decay_rate: 0.6,
            questionable_discount: 0.85,
            low_data_penalty: 0.2,
            injury_penalty: 0.25,
            depth_penalty: 0.2,
            confidence_floor: 0.1,
            depth_threshold: 3,
            uniform_weight_positions: vec![Position::K],
            snap_share_weight: 0.4,
            best_matchup_multiplier: 1.2,
            worst_matchup_multiplier: 0.8,
            best_offense_multiplier: 1.3,
            worst_offense_multiplier: 0.7,
            team_count: 32,
            offense_rank_positions: vec![Position::K],
        }
    }
}

fn check(field: &str, ok: bool, value: impl std::fmt::Display, expected: &str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(EngineError::configuration(
            field,
            format!("expected {}, got {}", expected, value),
        ))
    }
}

impl ProjectionConfig {
    /// Reject values that would make projections meaningless.
    pub fn validate(&self) -> Result<()> {
        check(
            "recencyWindow",
            self.recency_window >= 1,
            self.recency_window,
            "at least 1",
        )?;
        check(
            "decayRate",
            self.decay_rate > 0.0 && self.decay_rate <= 1.0,
            self.decay_rate,
            "a value in (0, 1]",
        )?;
        check(
            "questionableDiscount",
            (0.0..=1.0).contains(&self.questionable_discount),
            self.questionable_discount,
            "a value in [0, 1]",
        )?;
        for (field, penalty) in [
            ("lowDataPenalty", self.low_data_penalty),
            ("injuryPenalty", self.injury_penalty),
            ("depthPenalty", self.depth_penalty),
        ] {
            check(
                field,
                (0.0..=1.0).contains(&penalty),
                penalty,
                "a value in [0, 1]",
            )?;
        }
        check(
            "confidenceFloor",
            self.confidence_floor > 0.0 && self.confidence_floor <= 1.0,
            self.confidence_floor,
            "a value in (0, 1]",
        )?;
        check(
            "snapShareWeight",
            (0.0..=1.0).contains(&self.snap_share_weight),
            self.snap_share_weight,
            "a value in [0, 1]",
        )?;
        for (best_field, best, worst_field, worst) in [
            (
                "bestMatchupMultiplier",
                self.best_matchup_multiplier,
                "worstMatchupMultiplier",
                self.worst_matchup_multiplier,
            ),
            (
                "bestOffenseMultiplier",
                self.best_offense_multiplier,
                "worstOffenseMultiplier",
                self.worst_offense_multiplier,
            ),
        ] {
            check(
                worst_field,
                worst.is_finite() && worst >= 0.0,
                worst,
                "a non-negative number",
            )?;
            check(
                best_field,
                best.is_finite() && best >= worst,
                best,
                &format!("a number no less than {}", worst_field),
            )?;
        }
        check("teamCount", self.team_count >= 2, self.team_count, "at least 2")?;
        for (field, positions) in [
            ("uniformWeightPositions", &self.uniform_weight_positions),
            ("offenseRankPositions", &self.offense_rank_positions),
        ] {
            if let Some(position) = positions.iter().find(|p| !p.is_projectable()) {
                return Err(EngineError::configuration(
                    field,
                    format!("{} is a lineup slot, not a player position", position),
                ));
            }
        }
        Ok(())
    }

    pub fn uses_uniform_weights(&self, position: Position) -> bool {
        self.uniform_weight_positions.contains(&position)
    }

    pub fn uses_offense_rank(&self, position: Position) -> bool {
        self.offense_rank_positions.contains(&position)
    }
}
