use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::ProjectionConfig;
use crate::error::{EngineError, Result};
use crate::scoring::{CompiledScorer, StatLine};
use crate::types::{InjuryStatus, PlayerId, Position, Season, Week};

#[cfg(test)]
mod tests;

/// Realized fantasy points for one past game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPoints {
    pub season: Season,
    pub week: Week,
    pub points: f64,
}

impl WeeklyPoints {
    pub fn new(season: Season, week: Week, points: f64) -> Self {
        Self {
            season,
            week,
            points,
        }
    }
}

/// Everything the engine knows about a player going into the target week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInput {
    pub player_id: PlayerId,
    pub position: Position,
    /// Season of the week being projected
    pub season: Season,
    /// 1 = starter
    pub depth_chart_order: u32,
    pub injury_status: InjuryStatus,
    /// Realized points, oldest first
    pub history: Vec<WeeklyPoints>,
    /// Expected output of a freely available player at this position, used
    /// when there is no history.
    pub replacement_baseline: f64,
    /// Fraction of offensive snaps played recently, in `[0, 1]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snap_share: Option<f64>,
    /// Opposing defense's rank against this position; 1 is the softest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opponent_rank: Option<u32>,
    /// Own team's scoring-offense rank; 1 scores the most
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_offense_rank: Option<u32>,
}

impl ProjectionInput {
    pub fn new(player_id: PlayerId, position: Position, season: Season) -> Self {
        Self {
            player_id,
            position,
            season,
            depth_chart_order: 1,
            injury_status: InjuryStatus::Active,
            history: Vec::new(),
            replacement_baseline: 0.0,
            snap_share: None,
            opponent_rank: None,
            team_offense_rank: None,
        }
    }

    pub fn with_depth_chart_order(mut self, order: u32) -> Self {
        self.depth_chart_order = order;
        self
    }

    pub fn with_injury_status(mut self, status: InjuryStatus) -> Self {
        self.injury_status = status;
        self
    }

    pub fn with_history(mut self, mut history: Vec<WeeklyPoints>) -> Self {
        history.sort_by_key(|w| (w.season, w.week));
        self.history = history;
        self
    }

    /// Score raw stat lines with a league's rules and use them as history.
    pub fn with_scored_history(self, scorer: &CompiledScorer, lines: &[StatLine]) -> Self {
        let history = lines
            .iter()
            .map(|line| WeeklyPoints::new(line.season, line.week, scorer.score(line).total))
            .collect();
        self.with_history(history)
    }

    pub fn with_replacement_baseline(mut self, baseline: f64) -> Self {
        self.replacement_baseline = baseline;
        self
    }

    pub fn with_snap_share(mut self, snap_share: f64) -> Self {
        self.snap_share = Some(snap_share);
        self
    }

    pub fn with_opponent_rank(mut self, rank: u32) -> Self {
        self.opponent_rank = Some(rank);
        self
    }

    pub fn with_team_offense_rank(mut self, rank: u32) -> Self {
        self.team_offense_rank = Some(rank);
        self
    }
}

/// A game that fed the recency average and its normalized weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedWeek {
    pub season: Season,
    pub week: Week,
    pub points: f64,
    pub weight: f64,
}

/// How a projection was assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionBasis {
    pub weeks: Vec<WeightedWeek>,
    pub recency_average: f64,
    pub role_multiplier: f64,
    /// 1.0 when no snap share was supplied
    pub usage_multiplier: f64,
    /// 1.0 when no matchup rank was supplied
    pub matchup_multiplier: f64,
    pub injury_multiplier: f64,
    pub used_baseline: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub player_id: PlayerId,
    pub position: Position,
    pub season: Season,
    pub target_week: Week,
    pub projected_points: f64,
    /// In `[confidence_floor, 1.0]`
    pub confidence: f64,
    pub basis: ProjectionBasis,
}

/// Project a player's points for `target_week`.
///
/// `projected = recency_average * role * usage * matchup * injury`, where role
/// is `decay_rate^(rank - 1)`. Usage and matchup are neutral (1.0) unless the
/// input carries a snap share or a rank. With no usable history the caller's
/// replacement baseline stands in for the recency average and confidence
/// drops to the floor.
///
/// Fails with [`EngineError::InvalidInput`] when the position is not a player
/// position, the depth-chart rank is 0, a snap share or rank is out of range,
/// or the history already contains the target week or later. An invalid
/// `config` is a configuration error.
pub fn project(
    input: &ProjectionInput,
    target_week: Week,
    config: &ProjectionConfig,
) -> Result<ProjectionResult> {
    config.validate()?;
    validate_input(input, target_week, config)?;

    let history: Vec<WeeklyPoints> = {
        let mut usable: Vec<WeeklyPoints> = input
            .history
            .iter()
            .copied()
            .filter(|w| w.points.is_finite())
            .collect();
        usable.sort_by_key(|w| (w.season, w.week));
        usable
    };

    let window = &history[history.len().saturating_sub(config.recency_window)..];
    let weights = recency_weights(window.len(), config.uses_uniform_weights(input.position));
    let weeks: Vec<WeightedWeek> = window
        .iter()
        .zip(weights)
        .map(|(w, weight)| WeightedWeek {
            season: w.season,
            week: w.week,
            points: w.points,
            weight,
        })
        .collect();

    let used_baseline = weeks.is_empty();
    let recency_average = if used_baseline {
        debug!(
            player = %input.player_id,
            baseline = input.replacement_baseline,
            "No usable history, falling back to replacement baseline"
        );
        input.replacement_baseline
    } else {
        weeks.iter().map(|w| w.points * w.weight).sum()
    };

    let role_multiplier = role_multiplier(input.depth_chart_order, config.decay_rate);
    let usage_multiplier = usage_multiplier(input.snap_share, config.snap_share_weight);
    let matchup_multiplier = matchup_multiplier(input, config);
    let injury_multiplier = injury_multiplier(input.injury_status, config);

    let projected_points = if injury_multiplier == 0.0 {
        0.0
    } else {
        recency_average
            * role_multiplier
            * usage_multiplier
            * matchup_multiplier
            * injury_multiplier
    };

    let confidence = confidence(input, weeks.len(), config);

    Ok(ProjectionResult {
        player_id: input.player_id.clone(),
        position: input.position,
        season: input.season,
        target_week,
        projected_points,
        confidence,
        basis: ProjectionBasis {
            weeks,
            recency_average,
            role_multiplier,
            usage_multiplier,
            matchup_multiplier,
            injury_multiplier,
            used_baseline,
        },
    })
}

fn validate_input(
    input: &ProjectionInput,
    target_week: Week,
    config: &ProjectionConfig,
) -> Result<()> {
    if !input.position.is_projectable() {
        return Err(EngineError::invalid_input(format!(
            "position {} has no projection model",
            input.position
        )));
    }
    if input.depth_chart_order == 0 {
        return Err(EngineError::invalid_input(
            "depth chart order must be at least 1",
        ));
    }
    if target_week.as_u16() == 0 {
        return Err(EngineError::invalid_input("target week must be at least 1"));
    }
    if let Some(share) = input.snap_share {
        if !(0.0..=1.0).contains(&share) {
            return Err(EngineError::invalid_input(format!(
                "snap share must be in [0, 1], got {}",
                share
            )));
        }
    }
    for (what, rank) in [
        ("opponent rank", input.opponent_rank),
        ("team offense rank", input.team_offense_rank),
    ] {
        if let Some(rank) = rank {
            if rank == 0 || rank > config.team_count {
                return Err(EngineError::invalid_input(format!(
                    "{} must be in 1..={}, got {}",
                    what, config.team_count, rank
                )));
            }
        }
    }

    if let Some(latest) = input.history.iter().max_by_key(|w| (w.season, w.week)) {
        let in_future = latest.season < input.season
            || (latest.season == input.season && latest.week < target_week);
        if !in_future {
            return Err(EngineError::invalid_input(format!(
                "target week {} of {} is not after latest game (week {} of {})",
                target_week, input.season, latest.week, latest.season
            )));
        }
    }

    let has_usable_history = input.history.iter().any(|w| w.points.is_finite());
    if !has_usable_history && !input.replacement_baseline.is_finite() {
        return Err(EngineError::invalid_input(
            "replacement baseline must be a finite number",
        ));
    }

    Ok(())
}

/// Normalized weights for `n` games, oldest first.
///
/// Recency weights are proportional to rank (oldest 1, newest `n`).
fn recency_weights(n: usize, uniform: bool) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    if uniform {
        return vec![1.0 / n as f64; n];
    }
    let total = (n * (n + 1) / 2) as f64;
    (1..=n).map(|rank| rank as f64 / total).collect()
}

/// `decay_rate^(rank - 1)`; rank 1 is 1.0.
pub fn role_multiplier(depth_chart_order: u32, decay_rate: f64) -> f64 {
    let steps = depth_chart_order.saturating_sub(1).min(i32::MAX as u32) as i32;
    decay_rate.powi(steps)
}

/// `1 - weight + weight * snap_share`; a full-time player keeps 1.0.
pub fn usage_multiplier(snap_share: Option<f64>, weight: f64) -> f64 {
    match snap_share {
        Some(share) => 1.0 - weight + weight * share,
        None => 1.0,
    }
}

/// Linear in rank from the best multiplier at rank 1 to the worst at
/// `team_count`. Positions in `offense_rank_positions` use their own team's
/// scoring-offense rank, everyone else the opposing defense's rank.
pub fn matchup_multiplier(input: &ProjectionInput, config: &ProjectionConfig) -> f64 {
    let (rank, best, worst) = if config.uses_offense_rank(input.position) {
        (
            input.team_offense_rank,
            config.best_offense_multiplier,
            config.worst_offense_multiplier,
        )
    } else {
        (
            input.opponent_rank,
            config.best_matchup_multiplier,
            config.worst_matchup_multiplier,
        )
    };

    match rank {
        Some(rank) => {
            let step = (best - worst) / f64::from(config.team_count - 1);
            best - f64::from(rank.saturating_sub(1)) * step
        }
        None => 1.0,
    }
}

pub fn injury_multiplier(status: InjuryStatus, config: &ProjectionConfig) -> f64 {
    match status {
        InjuryStatus::Active => 1.0,
        InjuryStatus::Questionable => config.questionable_discount,
        InjuryStatus::Out | InjuryStatus::IR => 0.0,
    }
}

fn confidence(input: &ProjectionInput, games_used: usize, config: &ProjectionConfig) -> f64 {
    if games_used == 0 {
        return config.confidence_floor;
    }

    let mut confidence = 1.0;
    if games_used < config.recency_window {
        confidence -= config.low_data_penalty;
    }
    if !input.injury_status.is_active() {
        confidence -= config.injury_penalty;
    }
    if input.depth_chart_order > config.depth_threshold {
        confidence -= config.depth_penalty;
    }
    f64::clamp(confidence, config.confidence_floor, 1.0)
}

/// Project many players in parallel; output order matches input order.
pub fn project_batch(
    inputs: &[ProjectionInput],
    target_week: Week,
    config: &ProjectionConfig,
) -> Vec<Result<ProjectionResult>> {
    inputs
        .par_iter()
        .map(|input| project(input, target_week, config))
        .collect()
}

/// Order projections best first: projected points, then confidence.
pub fn rank_projections(results: &mut [ProjectionResult]) {
    results.sort_by(|a, b| {
        b.projected_points
            .partial_cmp(&a.projected_points)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                b.confidence
                    .partial_cmp(&a.confidence)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    });
}
