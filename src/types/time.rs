//! Season and week types for NFL scheduling.

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for Season years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Season(pub u16);

impl Season {
    pub fn new(year: u16) -> Self {
        Self(year)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl Default for Season {
    fn default() -> Self {
        Self(2025)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse()
            .map(Self)
            .map_err(|e| EngineError::invalid_input(format!("invalid season '{}': {}", s, e)))
    }
}

/// Type-safe wrapper for Week numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Week(pub u16);

impl Week {
    pub fn new(week: u16) -> Self {
        Self(week)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl Default for Week {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Week {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse()
            .map(Self)
            .map_err(|e| EngineError::invalid_input(format!("invalid week '{}': {}", s, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_ordering() {
        assert!(Week::new(3) < Week::new(10));
        assert!(Season::new(2023) < Season::new(2024));
    }

    #[test]
    fn test_parse_errors_are_invalid_input() {
        assert!("abc".parse::<Week>().unwrap_err().is_invalid_input());
        assert!("-1".parse::<Season>().unwrap_err().is_invalid_input());
        assert_eq!("7".parse::<Week>().unwrap(), Week::new(7));
    }

    #[test]
    fn test_serde_is_transparent_number() {
        assert_eq!(serde_json::to_string(&Week::new(5)).unwrap(), "5");
        let season: Season = serde_json::from_str("2024").unwrap();
        assert_eq!(season, Season::new(2024));
    }
}
