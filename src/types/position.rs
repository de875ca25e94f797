//! Fantasy football position types and utilities.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fantasy football player positions.
///
/// Covers both the positions a player can be projected at and the lineup
/// slots a roster entry can occupy.
///
/// # Position Types
///
/// - **Individual positions**: QB, RB, WR, TE, K, DEF
/// - **Flexible positions**: FLEX (RB/WR/TE)
/// - **Roster slots**: BE (bench), IR (injured reserve)
///
/// Only individual positions select a projection model; FLEX, BE and IR are
/// rejected by the projection engine.
///
/// # Examples
///
/// ```rust
/// use ffl_engine::Position;
///
/// let qb: Position = "qb".parse().unwrap();
/// assert_eq!(qb, Position::QB);
/// assert!(qb.is_projectable());
/// assert!(!Position::FLEX.is_projectable());
/// assert_eq!(Position::DEF.to_string(), "DEF");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    K,
    DEF,
    FLEX,
    BE,
    IR,
}

impl Position {
    /// Positions with a projection model variant.
    pub const PROJECTABLE: [Position; 6] = [
        Position::QB,
        Position::RB,
        Position::WR,
        Position::TE,
        Position::K,
        Position::DEF,
    ];

    /// Whether this is a player position rather than a lineup slot.
    pub fn is_projectable(&self) -> bool {
        Self::PROJECTABLE.contains(self)
    }

    /// Get all individual positions that may fill this slot.
    ///
    /// FLEX expands to RB/WR/TE; BE and IR accept any player position.
    pub fn get_eligible_positions(&self) -> Vec<Position> {
        match self {
            Position::FLEX => vec![Position::RB, Position::WR, Position::TE],
            Position::BE | Position::IR => Self::PROJECTABLE.to_vec(),
            other => vec![*other],
        }
    }

    /// Whether a lineup slot counts toward the team total.
    pub fn is_scoring_slot(&self) -> bool {
        !matches!(self, Position::BE | Position::IR)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::K => "K",
            Position::DEF => "DEF",
            Position::FLEX => "FLEX",
            Position::BE => "BE",
            Position::IR => "IR",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Position {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Ok(Position::QB),
            "RB" => Ok(Position::RB),
            "WR" => Ok(Position::WR),
            "TE" => Ok(Position::TE),
            "K" | "PK" => Ok(Position::K),
            "DEF" | "D/ST" | "DST" => Ok(Position::DEF),
            "FLEX" | "W/R/T" => Ok(Position::FLEX),
            "BE" | "BN" | "BENCH" => Ok(Position::BE),
            "IR" => Ok(Position::IR),
            _ => Err(EngineError::invalid_input(format!(
                "unrecognized position '{}'",
                s
            ))),
        }
    }
}

impl TryFrom<String> for Position {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Position> for String {
    fn from(position: Position) -> Self {
        position.to_string()
    }
}
