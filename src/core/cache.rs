//! In-memory LRU cache of compiled league scorers
//!
//! Compiling is cheap but not free, and a service scoring many players for
//! the same league should not recompile per request. Entries are keyed by
//! league and season and remember the ruleset they were compiled from: a
//! lookup with a different ruleset compiles a fresh scorer and replaces the
//! entry, so callers holding the old `Arc` keep scoring with the old rules.

use lru::LruCache;
use std::{
    fmt,
    num::NonZeroUsize,
    sync::{Arc, Mutex, MutexGuard},
};
use tracing::debug;

use crate::error::Result;
use crate::scoring::{compile, CompiledScorer, ScoringSystem};
use crate::types::Season;

/// Cache key for one league's rules in one season
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScorerKey {
    pub league: String,
    pub season: Season,
}

impl ScorerKey {
    pub fn new(league: impl Into<String>, season: Season) -> Self {
        Self {
            league: league.into(),
            season,
        }
    }
}

impl fmt::Display for ScorerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.league, self.season)
    }
}

struct CachedScorer {
    system: ScoringSystem,
    scorer: Arc<CompiledScorer>,
}

pub struct ScorerCache {
    entries: Mutex<LruCache<ScorerKey, CachedScorer>>,
    capacity: usize,
}

impl ScorerCache {
    /// Create a cache holding at most `capacity` leagues (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            capacity: capacity.get(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<ScorerKey, CachedScorer>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Return the cached scorer for `key` if it was compiled from `system`,
    /// otherwise compile, cache and return a new one.
    pub fn get_or_compile(
        &self,
        key: &ScorerKey,
        system: &ScoringSystem,
    ) -> Result<Arc<CompiledScorer>> {
        if let Some(cached) = self.lock().get(key) {
            if cached.system == *system {
                debug!(%key, "Scorer cache hit");
                return Ok(Arc::clone(&cached.scorer));
            }
            debug!(%key, "Scoring rules changed, recompiling");
        }

        let scorer = Arc::new(compile(system)?);
        self.lock().put(
            key.clone(),
            CachedScorer {
                system: system.clone(),
                scorer: Arc::clone(&scorer),
            },
        );
        Ok(scorer)
    }

    pub fn get(&self, key: &ScorerKey) -> Option<Arc<CompiledScorer>> {
        self.lock().get(key).map(|cached| Arc::clone(&cached.scorer))
    }

    /// Drop one league's scorer (used when its rules are known to be stale).
    pub fn invalidate(&self, key: &ScorerKey) -> bool {
        self.lock().pop(key).is_some()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// (entries in use, capacity)
    pub fn stats(&self) -> (usize, usize) {
        (self.lock().len(), self.capacity)
    }
}

impl Default for ScorerCache {
    fn default() -> Self {
        Self::new(32)
    }
}
