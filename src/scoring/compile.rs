use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::rules::{ScoringRule, ScoringSystem, TierBand, TierMode};
use super::stats::{stat_aliases, FantasyPointsResult, StatLine};
use crate::error::{EngineError, Result};


/// A rule's scoring form, resolved once at compile time.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleKind {
    /// `rate * value`
    Flat { rate: f64 },
    /// `rate * max(0, value - min)`
    Threshold { rate: f64, min: f64 },
    /// Band lookup; bands are sorted ascending and disjoint.
    Tiered { bands: Vec<TierBand>, mode: TierMode },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompiledRule {
    pub stat: String,
    pub kind: RuleKind,
    /// `|max_points|`: upper bound for non-negative rates, lower bound of
    /// `-cap` for negative rates.
    pub cap: Option<f64>,
    /// Stat line keys to try, exact name first.
    lookup_keys: Vec<String>,
}

impl CompiledRule {
    /// Points contributed by a single stat value.
    pub fn points_for(&self, value: f64) -> f64 {
        // (contribution, rate that produced it)
        let (raw, rate) = match &self.kind {
            RuleKind::Flat { rate } => (rate * value, *rate),
            RuleKind::Threshold { rate, min } => (rate * (value - min).max(0.0), *rate),
            RuleKind::Tiered { bands, mode } => bands
                .iter()
                .find(|band| band.contains(value))
                .map(|band| match mode {
                    TierMode::PerUnit => (band.points * value, band.points),
                    TierMode::Flat => (band.points, band.points),
                })
                .unwrap_or((0.0, 0.0)),
        };

        match self.cap {
            // A ceiling for rewards, a floor of `-cap` for penalties.
            Some(cap) if rate < 0.0 => raw.max(-cap),
            Some(cap) => raw.min(cap),
            None => raw,
        }
    }

    fn value_in(&self, line: &StatLine) -> Option<f64> {
        self.lookup_keys.iter().find_map(|key| line.get(key))
    }
}

/// A league's scoring rules, validated and ready to score stat lines.
///
/// Immutable once built; share it behind an `Arc` across threads and compile
/// a new one when the league's rules change.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledScorer {
    rules: Vec<CompiledRule>,
}

/// Validate a scoring system and resolve every rule into its [`RuleKind`].
///
/// Fails with [`EngineError::Configuration`] for inverted or overlapping tier
/// bands, a negative threshold, or non-finite numbers.
pub fn compile(system: &ScoringSystem) -> Result<CompiledScorer> {
    let mut rules = Vec::with_capacity(system.len());

    for (stat, rule) in system.iter() {
        if stat.trim().is_empty() {
            return Err(EngineError::configuration(stat, "stat name must not be empty"));
        }

        let kind = resolve_kind(stat, rule)?;
        let cap = match rule.max_points {
            Some(max) => Some(finite(stat, "max_points", max)?.abs()),
            None => None,
        };

        let mut lookup_keys = vec![stat.clone()];
        lookup_keys.extend(
            stat_aliases(stat)
                .iter()
                .filter(|alias| !system.contains(alias))
                .map(|alias| alias.to_string()),
        );

        rules.push(CompiledRule {
            stat: stat.clone(),
            kind,
            cap,
            lookup_keys,
        });
    }

    debug!("Compiled scoring system with {} rules", rules.len());
    Ok(CompiledScorer { rules })
}

fn finite(stat: &str, what: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::configuration(
            stat,
            format!("{} must be a finite number, got {}", what, value),
        ))
    }
}

fn resolve_kind(stat: &str, rule: &ScoringRule) -> Result<RuleKind> {
    let rate = finite(stat, "points", rule.points)?;

    if let Some(threshold) = rule.threshold {
        let threshold = finite(stat, "threshold", threshold)?;
        if threshold < 0.0 {
            return Err(EngineError::configuration(
                stat,
                format!("threshold must not be negative, got {}", threshold),
            ));
        }
    }

    if let Some(tiers) = rule.active_tiers() {
        if rule.threshold.is_some() {
            warn!(stat = %stat, "threshold is ignored because tier_rules are present");
        }
        if rule.points != 0.0 {
            warn!(stat = %stat, "flat points are ignored because tier_rules are present");
        }
        let bands = validate_bands(stat, tiers)?;
        return Ok(RuleKind::Tiered {
            bands,
            mode: rule.tier_mode,
        });
    }

    Ok(match rule.threshold {
        Some(min) => RuleKind::Threshold { rate, min },
        None => RuleKind::Flat { rate },
    })
}

fn validate_bands(stat: &str, tiers: &[TierBand]) -> Result<Vec<TierBand>> {
    for band in tiers {
        finite(stat, "tier min", band.min)?;
        finite(stat, "tier points", band.points)?;
        if let Some(max) = band.max {
            finite(stat, "tier max", max)?;
        }
        if band.min > band.upper() {
            return Err(EngineError::configuration(
                stat,
                format!("tier band min {} exceeds max {}", band.min, band.upper()),
            ));
        }
    }

    let mut bands = tiers.to_vec();
    bands.sort_by(|a, b| a.min.total_cmp(&b.min));

    for pair in bands.windows(2) {
        let (lower, upper) = (&pair[0], &pair[1]);
        if upper.min <= lower.upper() {
            return Err(EngineError::configuration(
                stat,
                format!(
                    "tier bands [{}, {}] and [{}, {}] overlap",
                    lower.min,
                    lower.upper(),
                    upper.min,
                    upper.upper()
                ),
            ));
        }
    }

    Ok(bands)
}

impl CompiledScorer {
    /// Score one stat line. Never fails: unscored stats are ignored and
    /// scored stats missing from the line contribute nothing.
    pub fn score(&self, line: &StatLine) -> FantasyPointsResult {
        let mut breakdown = BTreeMap::new();
        for rule in &self.rules {
            if let Some(value) = rule.value_in(line) {
                breakdown.insert(rule.stat.clone(), rule.points_for(value));
            }
        }

        FantasyPointsResult {
            player_id: line.player_id.clone(),
            season: line.season,
            week: line.week,
            total: breakdown.values().sum(),
            breakdown,
        }
    }

    /// Score many stat lines in parallel; output order matches input order.
    pub fn score_batch(&self, lines: &[StatLine]) -> Vec<FantasyPointsResult> {
        lines.par_iter().map(|line| self.score(line)).collect()
    }

    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    pub fn rule(&self, stat: &str) -> Option<&CompiledRule> {
        self.rules.iter().find(|rule| rule.stat == stat)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
