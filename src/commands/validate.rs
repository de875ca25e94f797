//! `validate`: compile a rules file and describe what each rule does.

use serde::Serialize;

use crate::{
    cli::RulesArgs,
    scoring::{CompiledRule, RuleKind, TierMode},
    Result, Season,
};

use super::common::{print_json, CommandContext};

#[derive(Debug, Clone, Serialize)]
pub struct RuleSummary {
    pub stat: String,
    pub description: String,
}

/// One-line, human readable form of a compiled rule.
pub fn describe_rule(rule: &CompiledRule) -> String {
    let base = match &rule.kind {
        RuleKind::Flat { rate } => format!("{} per unit", rate),
        RuleKind::Threshold { rate, min } => format!("{} per unit above {}", rate, min),
        RuleKind::Tiered { bands, mode } => {
            let unit = match mode {
                TierMode::PerUnit => " per unit",
                TierMode::Flat => "",
            };
            let bands: Vec<String> = bands
                .iter()
                .map(|band| match band.max {
                    Some(max) => format!("{}-{}: {}{}", band.min, max, band.points, unit),
                    None => format!("{}+: {}{}", band.min, band.points, unit),
                })
                .collect();
            format!("tiers [{}]", bands.join(", "))
        }
    };

    match rule.cap {
        Some(cap) => format!("{} (capped at {})", base, cap),
        None => base,
    }
}

pub fn handle_validate(ctx: &CommandContext, rules: &RulesArgs, as_json: bool) -> Result<()> {
    let scorer = ctx.scorer(rules, Season::default())?;
    let summaries: Vec<RuleSummary> = scorer
        .rules()
        .iter()
        .map(|rule| RuleSummary {
            stat: rule.stat.clone(),
            description: describe_rule(rule),
        })
        .collect();

    if as_json {
        return print_json(&summaries);
    }

    println!(
        "✓ {} compiled: {} scoring rules",
        rules.rules.display(),
        summaries.len()
    );
    for summary in &summaries {
        println!("  {:<28} {}", summary.stat, summary.description);
    }
    Ok(())
}
