//! Team totals for a week's lineup.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::compile::CompiledScorer;
use super::stats::StatLine;
use crate::types::{PlayerId, Position};

fn default_starting() -> bool {
    true
}

/// One roster entry for the week being scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupSlot {
    pub player_id: PlayerId,
    pub slot: Position,
    #[serde(default = "default_starting")]
    pub starting: bool,
}

impl LineupSlot {
    pub fn new(player_id: PlayerId, slot: Position) -> Self {
        Self {
            player_id,
            slot,
            starting: true,
        }
    }

    pub fn benched(mut self) -> Self {
        self.starting = false;
        self
    }
}

/// Points credited to one starter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerPoints {
    pub player_id: PlayerId,
    pub slot: Position,
    pub points: f64,
    pub breakdown: BTreeMap<String, f64>,
    /// False when no stat line was supplied for this starter.
    pub stats_available: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamPointsResult {
    pub total: f64,
    pub players: Vec<PlayerPoints>,
}

impl CompiledScorer {
    /// Sum the points of every starter in a scoring slot.
    ///
    /// Bench and IR slots, and non-starters, are skipped. A starter with no
    /// stat line scores zero and is flagged rather than failing the team.
    pub fn score_lineup(&self, lineup: &[LineupSlot], stat_lines: &[StatLine]) -> TeamPointsResult {
        let by_player: HashMap<&PlayerId, &StatLine> = stat_lines
            .iter()
            .rev()
            .map(|line| (&line.player_id, line))
            .collect();

        let players: Vec<PlayerPoints> = lineup
            .iter()
            .filter(|entry| entry.starting && entry.slot.is_scoring_slot())
            .map(|entry| match by_player.get(&entry.player_id) {
                Some(line) => {
                    let result = self.score(line);
                    PlayerPoints {
                        player_id: entry.player_id.clone(),
                        slot: entry.slot,
                        points: result.total,
                        breakdown: result.breakdown,
                        stats_available: true,
                    }
                }
                None => PlayerPoints {
                    player_id: entry.player_id.clone(),
                    slot: entry.slot,
                    points: 0.0,
                    breakdown: BTreeMap::new(),
                    stats_available: false,
                },
            })
            .collect();

        TeamPointsResult {
            total: players.iter().map(|p| p.points).sum(),
            players,
        }
    }
}
