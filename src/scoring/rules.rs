//! Scoring rule definitions as supplied by the league configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::Result;

/// One band of a tiered rule. `max` omitted means the band is unbounded above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierBand {
    pub min: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub points: f64,
}

impl TierBand {
    pub fn new(min: f64, max: f64, points: f64) -> Self {
        Self {
            min,
            max: Some(max),
            points,
        }
    }

    pub fn unbounded(min: f64, points: f64) -> Self {
        Self {
            min,
            max: None,
            points,
        }
    }

    pub fn upper(&self) -> f64 {
        self.max.unwrap_or(f64::INFINITY)
    }

    /// Closed-interval membership: `min <= value <= max`.
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.upper()
    }
}

/// How a tier band's `points` is applied to the stat value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierMode {
    /// `points` per unit of the stat, multiplied by the full stat value
    #[default]
    PerUnit,
    /// `points` awarded once when the stat lands in the band
    Flat,
}

/// A single stat's scoring rule.
///
/// When `tier_rules` is present it takes precedence over `points` and
/// `threshold`. `max_points` applies to whichever form is in effect.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoringRule {
    #[serde(default)]
    pub points: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_points: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier_rules: Option<Vec<TierBand>>,
    #[serde(default)]
    pub tier_mode: TierMode,
}

impl ScoringRule {
    pub fn per_unit(points: f64) -> Self {
        Self {
            points,
            ..Default::default()
        }
    }

    pub fn tiered(bands: Vec<TierBand>, mode: TierMode) -> Self {
        Self {
            tier_rules: Some(bands),
            tier_mode: mode,
            ..Default::default()
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn with_max_points(mut self, max_points: f64) -> Self {
        self.max_points = Some(max_points);
        self
    }

    /// Tier bands that actually drive scoring (an empty list counts as absent).
    pub fn active_tiers(&self) -> Option<&[TierBand]> {
        self.tier_rules
            .as_deref()
            .filter(|bands| !bands.is_empty())
    }
}

/// A league's full scoring configuration keyed by stat name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoringSystem {
    pub rules: BTreeMap<String, ScoringRule>,
}

impl ScoringSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, stat: impl Into<String>, rule: ScoringRule) -> Self {
        self.insert(stat, rule);
        self
    }

    pub fn insert(&mut self, stat: impl Into<String>, rule: ScoringRule) -> Option<ScoringRule> {
        self.rules.insert(stat.into(), rule)
    }

    pub fn get(&self, stat: &str) -> Option<&ScoringRule> {
        self.rules.get(stat)
    }

    pub fn contains(&self, stat: &str) -> bool {
        self.rules.contains_key(stat)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ScoringRule)> {
        self.rules.iter()
    }

    /// Parse the native JSON shape: `{"stat_name": {"points": .., ...}, ...}`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
