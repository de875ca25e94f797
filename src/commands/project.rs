//! `project`: score each player's recent games, project the target week and
//! rank the results.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

use crate::{
    cli::RulesArgs,
    projection::{project_batch, rank_projections, ProjectionInput, ProjectionResult},
    scoring::{CompiledScorer, StatLine},
    EngineError, InjuryStatus, PlayerId, Position, Result, Season, Week,
};

use super::common::{format_points, print_json, read_json, CommandContext};

/// One entry of the `--players` file.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerRecord {
    pub player_id: PlayerId,
    #[serde(default)]
    pub name: Option<String>,
    /// Parsed per player so one bad entry does not sink the file.
    pub position: String,
    #[serde(default = "default_depth_chart_order")]
    pub depth_chart_order: u32,
    #[serde(default)]
    pub injury_status: InjuryStatus,
    #[serde(default)]
    pub stat_lines: Vec<StatLine>,
    /// Overrides the configured baseline for this player's position.
    #[serde(default)]
    pub replacement_baseline: Option<f64>,
    #[serde(default)]
    pub snap_share: Option<f64>,
    #[serde(default)]
    pub opponent_rank: Option<u32>,
    #[serde(default)]
    pub team_offense_rank: Option<u32>,
}

fn default_depth_chart_order() -> u32 {
    1
}

impl PlayerRecord {
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.player_id.to_string())
    }

    /// Build the engine input, scoring the player's stat lines with `scorer`.
    pub fn to_input(
        &self,
        scorer: &CompiledScorer,
        season: Season,
        default_baseline: impl Fn(Position) -> f64,
    ) -> Result<ProjectionInput> {
        let position: Position = self.position.parse()?;
        if let Some(line) = self
            .stat_lines
            .iter()
            .find(|line| line.player_id != self.player_id)
        {
            return Err(EngineError::invalid_input(format!(
                "stat line for {} listed under player {}",
                line.player_id, self.player_id
            )));
        }

        let mut input = ProjectionInput::new(self.player_id.clone(), position, season)
            .with_depth_chart_order(self.depth_chart_order)
            .with_injury_status(self.injury_status)
            .with_scored_history(scorer, &self.stat_lines)
            .with_replacement_baseline(
                self.replacement_baseline
                    .unwrap_or_else(|| default_baseline(position)),
            );
        input.snap_share = self.snap_share;
        input.opponent_rank = self.opponent_rank;
        input.team_offense_rank = self.team_offense_rank;
        Ok(input)
    }
}

/// A ranked projection with the player's display name attached.
#[derive(Debug, Clone, Serialize)]
pub struct RankedProjection {
    pub rank: usize,
    pub name: String,
    #[serde(flatten)]
    pub projection: ProjectionResult,
}

/// A player that could not be projected.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedPlayer {
    pub player_id: PlayerId,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectionReport {
    pub season: Season,
    pub week: Week,
    pub projections: Vec<RankedProjection>,
    pub skipped: Vec<SkippedPlayer>,
}

/// Project every player in `records` and rank the successful projections.
pub fn build_report(
    ctx: &CommandContext,
    scorer: &CompiledScorer,
    records: &[PlayerRecord],
    season: Season,
    week: Week,
    limit: Option<usize>,
) -> ProjectionReport {
    let mut skipped = Vec::new();
    let mut inputs = Vec::with_capacity(records.len());
    let mut names = HashMap::with_capacity(records.len());

    for record in records {
        match record.to_input(scorer, season, |p| ctx.config.baseline_for(p)) {
            Ok(input) => {
                names.insert(record.player_id.clone(), record.display_name());
                inputs.push(input);
            }
            Err(e) => {
                warn!(player = %record.player_id, error = %e, "Skipping player");
                skipped.push(SkippedPlayer {
                    player_id: record.player_id.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let mut results = Vec::with_capacity(inputs.len());
    for (outcome, input) in project_batch(&inputs, week, &ctx.config.projection)
        .into_iter()
        .zip(&inputs)
    {
        match outcome {
            Ok(result) => results.push(result),
            Err(e) => {
                warn!(player = %input.player_id, error = %e, "Projection failed");
                skipped.push(SkippedPlayer {
                    player_id: input.player_id.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    rank_projections(&mut results);
    debug!(
        projected = results.len(),
        skipped = skipped.len(),
        "Projections ranked"
    );

    let projections = results
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .enumerate()
        .map(|(i, projection)| {
            let name = names
                .get(&projection.player_id)
                .cloned()
                .unwrap_or_else(|| projection.player_id.to_string());
            RankedProjection {
                rank: i + 1,
                name,
                projection,
            }
        })
        .collect();

    ProjectionReport {
        season,
        week,
        projections,
        skipped,
    }
}

pub fn handle_project(
    ctx: &CommandContext,
    rules: &RulesArgs,
    players_path: &Path,
    season: Season,
    week: Week,
    limit: Option<usize>,
    as_json: bool,
) -> Result<()> {
    let records: Vec<PlayerRecord> = read_json(players_path)?;
    let scorer = ctx.scorer(rules, season)?;
    let report = build_report(ctx, &scorer, &records, season, week, limit);

    if as_json {
        return print_json(&report);
    }

    println!("Projections for Week {}", week.as_u16());
    println!("Season: {}", season.as_u16());
    println!();
    println!(
        "{:<4} {:<20} {:<5} {:>8} {:>6}  Basis",
        "#", "Name", "Pos", "Proj", "Conf%"
    );
    for ranked in &report.projections {
        let p = &ranked.projection;
        let basis = if p.basis.used_baseline {
            "replacement baseline".to_string()
        } else {
            format!("{} games", p.basis.weeks.len())
        };
        println!(
            "{:<4} {:<20} {:<5} {:>8} {:>5}%  {}",
            ranked.rank,
            ranked.name.chars().take(20).collect::<String>(),
            p.position.to_string(),
            format_points(p.projected_points),
            (p.confidence * 100.0).round() as u8,
            basis
        );
    }

    if !report.skipped.is_empty() {
        println!();
        println!("Skipped {} players:", report.skipped.len());
        for skipped in &report.skipped {
            println!("  {}: {}", skipped.player_id, skipped.reason);
        }
    }
    Ok(())
}
