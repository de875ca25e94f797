//! Identifier types for players.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{EngineError, Result};

/// Stable player identifier supplied by the stats ingestion pipeline
/// (for example a GSIS id such as `00-0033873`).
///
/// # Examples
///
/// ```rust
/// use ffl_engine::PlayerId;
///
/// let id = PlayerId::new("00-0033873");
/// assert_eq!(id.as_str(), "00-0033873");
/// assert_eq!(id.to_string(), "00-0033873");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlayerId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(EngineError::invalid_input("player id must not be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }
}
