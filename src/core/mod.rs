//! Core utilities shared by the library and the CLI
//!
//! - `cache`: in-memory LRU cache of compiled league scorers
//! - `files`: config paths and small file helpers

pub mod cache;
pub mod files;

pub use cache::{ScorerCache, ScorerKey};
pub use files::{default_config_path, try_read_to_string, write_string};
