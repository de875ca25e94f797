//! `score`: fantasy points for a file of stat lines, or a lineup's total.

use std::path::Path;

use crate::{
    cli::RulesArgs,
    scoring::{LineupSlot, StatLine},
    Result, Season,
};

use super::common::{format_points, print_json, read_json, CommandContext};

pub fn handle_score(
    ctx: &CommandContext,
    rules: &RulesArgs,
    stats_path: &Path,
    lineup_path: Option<&Path>,
    as_json: bool,
) -> Result<()> {
    let stat_lines: Vec<StatLine> = read_json(stats_path)?;
    let scorer = ctx.scorer(rules, batch_season(&stat_lines))?;

    if let Some(lineup_path) = lineup_path {
        let lineup: Vec<LineupSlot> = read_json(lineup_path)?;
        let team = scorer.score_lineup(&lineup, &stat_lines);

        if as_json {
            return print_json(&team);
        }

        for player in &team.players {
            let note = if player.stats_available {
                ""
            } else {
                " (no stats)"
            };
            println!(
                "{:<5} {:<14} {:>7}{}",
                player.slot.to_string(),
                player.player_id.to_string(),
                format_points(player.points),
                note
            );
        }
        println!("Team total: {}", format_points(team.total));
        return Ok(());
    }

    let mut results = scorer.score_batch(&stat_lines);
    results.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if as_json {
        return print_json(&results);
    }

    if results.is_empty() {
        println!("No stat lines in {}.", stats_path.display());
        return Ok(());
    }

    for result in &results {
        println!(
            "{:<14} {} wk {:<2} {:>7}",
            result.player_id.to_string(),
            result.season,
            result.week.as_u16(),
            format_points(result.total)
        );
    }
    Ok(())
}

/// Season a batch of stat lines belongs to, used for the scorer cache key.
pub fn batch_season(stat_lines: &[StatLine]) -> Season {
    stat_lines
        .iter()
        .map(|line| line.season)
        .max()
        .unwrap_or_default()
}
