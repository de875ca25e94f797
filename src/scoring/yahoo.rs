//! Import of Yahoo Fantasy scoring settings.
//!
//! Yahoo reports scoring by display name (`"Passing Yards"`) with values that
//! may arrive as numbers or numeric strings:
//!
//! ```json
//! {
//!   "Passing Yards": {"value": "0.04"},
//!   "Receptions": {"value": 1, "max_points": 10},
//!   "Points Allowed": {"award": "flat", "tiers": [{"min": 0, "max": 0, "value": 10}]}
//! }
//! ```

use serde::{de::Error, Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

use super::rules::{ScoringRule, ScoringSystem, TierBand, TierMode};
use crate::error::{EngineError, Result};

/// Yahoo display name -> canonical stat name.
const YAHOO_STAT_MAPPING: &[(&str, &str)] = &[
    ("Passing Yards", "passing_yards"),
    ("Passing Touchdowns", "passing_tds"),
    ("Interceptions", "passing_ints"),
    ("Rushing Yards", "rushing_yards"),
    ("Rushing Touchdowns", "rushing_tds"),
    ("Reception Yards", "receiving_yards"),
    ("Receiving Yards", "receiving_yards"),
    ("Reception Touchdowns", "receiving_tds"),
    ("Receiving Touchdowns", "receiving_tds"),
    ("Receptions", "receptions"),
    ("Fumbles Lost", "fumbles_lost"),
    ("Field Goals Made", "field_goals"),
    ("Field Goals Attempted", "field_goal_attempts"),
    ("Extra Points Made", "extra_points"),
    ("Extra Points Attempted", "extra_point_attempts"),
    ("Defensive Interceptions", "defensive_ints"),
    ("Fumbles Recovered", "defensive_fumbles"),
    ("Sacks", "defensive_sacks"),
    ("Touchdowns", "defensive_tds"),
    ("Safeties", "defensive_safeties"),
    ("Points Allowed", "defensive_points_allowed"),
    ("Yards Allowed", "defensive_yards_allowed"),
];

pub fn canonical_stat_name(yahoo_name: &str) -> Option<&'static str> {
    YAHOO_STAT_MAPPING
        .iter()
        .find(|(name, _)| *name == yahoo_name)
        .map(|(_, canonical)| *canonical)
}

fn flexible_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn de_opt_flexible_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(raw) => flexible_f64(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected a number, got {}", raw))),
    }
}

#[derive(Debug, Deserialize)]
struct YahooTier {
    #[serde(default, deserialize_with = "de_opt_flexible_f64")]
    min: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_flexible_f64")]
    max: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_flexible_f64")]
    value: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct YahooStatConfig {
    #[serde(default, deserialize_with = "de_opt_flexible_f64")]
    value: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_flexible_f64")]
    threshold: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_flexible_f64")]
    max_points: Option<f64>,
    #[serde(default)]
    tiers: Option<Vec<YahooTier>>,
    #[serde(default)]
    award: TierMode,
}

impl From<YahooStatConfig> for ScoringRule {
    fn from(config: YahooStatConfig) -> Self {
        ScoringRule {
            points: config.value.unwrap_or(0.0),
            threshold: config.threshold,
            max_points: config.max_points,
            tier_rules: config.tiers.map(|tiers| {
                tiers
                    .into_iter()
                    .map(|tier| TierBand {
                        min: tier.min.unwrap_or(0.0),
                        max: tier.max,
                        points: tier.value.unwrap_or(0.0),
                    })
                    .collect()
            }),
            tier_mode: config.award,
        }
    }
}

/// Parse Yahoo scoring settings into a [`ScoringSystem`].
///
/// Unknown stat names are skipped with a warning. Malformed JSON or an entry
/// that cannot be read as a rule is a configuration error. The result still
/// has to go through [`compile`](super::compile) for structural validation.
pub fn parse_yahoo_scoring(json: &str) -> Result<ScoringSystem> {
    let raw: BTreeMap<String, Value> = serde_json::from_str(json)
        .map_err(|e| EngineError::configuration("yahoo_scoring", e.to_string()))?;

    let mut system = ScoringSystem::new();
    for (name, entry) in raw {
        let Some(stat) = canonical_stat_name(&name) else {
            warn!(stat = %name, "Skipping unrecognized Yahoo stat");
            continue;
        };

        let config: YahooStatConfig = serde_json::from_value(entry)
            .map_err(|e| EngineError::configuration(name.as_str(), e.to_string()))?;

        if system.insert(stat, config.into()).is_some() {
            warn!(stat = stat, yahoo_name = %name, "Duplicate Yahoo stat mapping, keeping the last entry");
        }
    }

    Ok(system)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::compile;
    use serde_json::json;

    #[test]
    fn test_parse_basic_yahoo_rules() {
        let json = json!({
            "Passing Yards": {"value": "0.04"},
            "Passing Touchdowns": {"value": 4},
            "Interceptions": {"value": -2}
        })
        .to_string();

        let system = parse_yahoo_scoring(&json).unwrap();

        assert_eq!(system.len(), 3);
        assert_eq!(system.get("passing_yards"), Some(&ScoringRule::per_unit(0.04)));
        assert_eq!(system.get("passing_tds"), Some(&ScoringRule::per_unit(4.0)));
        assert_eq!(system.get("passing_ints"), Some(&ScoringRule::per_unit(-2.0)));
    }

    #[test]
    fn test_parse_threshold_and_max_points() {
        let json = json!({
            "Rushing Yards": {"value": 0.1, "threshold": "100", "max_points": 20}
        })
        .to_string();

        let system = parse_yahoo_scoring(&json).unwrap();
        let rule = system.get("rushing_yards").unwrap();

        assert_eq!(rule.threshold, Some(100.0));
        assert_eq!(rule.max_points, Some(20.0));
    }

    #[test]
    fn test_parse_tiers_with_award_mode() {
        let json = json!({
            "Points Allowed": {
                "award": "flat",
                "tiers": [
                    {"min": 0, "max": 0, "value": 10},
                    {"min": 1, "max": 6, "value": 7},
                    {"min": 35, "value": -4}
                ]
            }
        })
        .to_string();

        let system = parse_yahoo_scoring(&json).unwrap();
        let rule = system.get("defensive_points_allowed").unwrap();
        let tiers = rule.active_tiers().unwrap();

        assert_eq!(rule.tier_mode, TierMode::Flat);
        assert_eq!(tiers[0], TierBand::new(0.0, 0.0, 10.0));
        assert_eq!(tiers[2], TierBand::unbounded(35.0, -4.0));

        let scorer = compile(&system).unwrap();
        let rule = scorer.rule("defensive_points_allowed").unwrap();
        assert_eq!(rule.points_for(3.0), 7.0);
    }

    #[test]
    fn test_unknown_stats_skipped() {
        let json = json!({
            "Receptions": {"value": 0.5},
            "Return Yards": {"value": 0.04}
        })
        .to_string();

        let system = parse_yahoo_scoring(&json).unwrap();
        assert_eq!(system.len(), 1);
        assert!(system.contains("receptions"));
    }

    #[test]
    fn test_malformed_json_is_configuration_error() {
        let err = parse_yahoo_scoring("{\"Receptions\": ").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_non_numeric_value_is_configuration_error() {
        let json = json!({"Receptions": {"value": "one"}}).to_string();
        let err = parse_yahoo_scoring(&json).unwrap_err();

        assert!(err.is_configuration());
        assert!(err.to_string().contains("Receptions"));
    }

    #[test]
    fn test_canonical_stat_name() {
        assert_eq!(canonical_stat_name("Reception Yards"), Some("receiving_yards"));
        assert_eq!(canonical_stat_name("Receiving Yards"), Some("receiving_yards"));
        assert_eq!(canonical_stat_name("Kick Returns"), None);
    }
}
