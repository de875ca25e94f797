//! Raw per-game stat lines and the fantasy points computed from them.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::types::{PlayerId, Season, Week};

/// Feed-specific spellings accepted for canonical stat names.
const STAT_ALIASES: &[(&str, &[&str])] = &[
    ("passing_yards", &["pass_yds", "passing_yds"]),
    ("passing_tds", &["pass_td", "passing_td"]),
    ("passing_ints", &["pass_int", "passing_int"]),
    ("rushing_yards", &["rush_yds", "rushing_yds"]),
    ("rushing_tds", &["rush_td", "rushing_td"]),
    ("receiving_yards", &["rec_yds", "receiving_yds"]),
    ("receiving_tds", &["rec_td", "receiving_td"]),
    ("receptions", &["rec", "catches"]),
    ("fumbles_lost", &["fumbles", "fum_lost"]),
    ("field_goals", &["fg_made", "fg"]),
    ("field_goal_attempts", &["fg_att", "fg_attempts"]),
    ("extra_points", &["xp_made", "xp"]),
    ("extra_point_attempts", &["xp_att", "xp_attempts"]),
];

/// Alternate names a stat may appear under in ingested stat lines.
pub fn stat_aliases(stat: &str) -> &'static [&'static str] {
    STAT_ALIASES
        .iter()
        .find(|(canonical, _)| *canonical == stat)
        .map(|(_, aliases)| *aliases)
        .unwrap_or(&[])
}

/// Keep numeric stats (numbers or numeric strings), drop everything else.
fn de_numeric_stats<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, Value> = Deserialize::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(k, v)| {
            let n = match &v {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            }?;
            n.is_finite().then_some((k, n))
        })
        .collect())
}

/// One player's raw counting stats for one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatLine {
    pub player_id: PlayerId,
    pub season: Season,
    pub week: Week,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opponent: Option<String>,
    #[serde(default, deserialize_with = "de_numeric_stats")]
    pub stats: BTreeMap<String, f64>,
}

impl StatLine {
    pub fn new(player_id: PlayerId, season: Season, week: Week) -> Self {
        Self {
            player_id,
            season,
            week,
            team: None,
            opponent: None,
            stats: BTreeMap::new(),
        }
    }

    pub fn with_stat(mut self, stat: impl Into<String>, value: f64) -> Self {
        self.stats.insert(stat.into(), value);
        self
    }

    pub fn with_matchup(mut self, team: impl Into<String>, opponent: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self.opponent = Some(opponent.into());
        self
    }

    /// Value of a stat, or `None` when absent or not a finite number.
    pub fn get(&self, stat: &str) -> Option<f64> {
        self.stats.get(stat).copied().filter(|v| v.is_finite())
    }
}

/// Fantasy points for one stat line under one league's rules.
///
/// `total` is the sum of `breakdown`; stats the league does not score are not
/// listed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FantasyPointsResult {
    pub player_id: PlayerId,
    pub season: Season,
    pub week: Week,
    pub total: f64,
    pub breakdown: BTreeMap<String, f64>,
}

impl FantasyPointsResult {
    pub fn breakdown_sum(&self) -> f64 {
        self.breakdown.values().sum()
    }
}
