//! Injury designations consumed by the projection engine.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A player's injury designation for the week being projected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum InjuryStatus {
    /// Healthy / full participant
    #[default]
    Active,
    /// Game-time decision
    Questionable,
    /// Ruled out for the week
    Out,
    /// Injured reserve
    IR,
}

impl InjuryStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, InjuryStatus::Active)
    }

    /// Out and IR players are not expected to take a snap.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, InjuryStatus::Out | InjuryStatus::IR)
    }
}

impl fmt::Display for InjuryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InjuryStatus::Active => "active",
            InjuryStatus::Questionable => "questionable",
            InjuryStatus::Out => "out",
            InjuryStatus::IR => "ir",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for InjuryStatus {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" | "healthy" | "full" => Ok(InjuryStatus::Active),
            "questionable" | "q" => Ok(InjuryStatus::Questionable),
            "out" | "o" => Ok(InjuryStatus::Out),
            "ir" | "injured_reserve" | "injured reserve" | "pup" => Ok(InjuryStatus::IR),
            _ => Err(EngineError::invalid_input(format!(
                "unrecognized injury status '{}'",
                s
            ))),
        }
    }
}

impl TryFrom<String> for InjuryStatus {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InjuryStatus> for String {
    fn from(status: InjuryStatus) -> Self {
        status.to_string()
    }
}
