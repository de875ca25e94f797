//! Type-safe wrappers and enums shared by the scoring and projection engines.

pub mod ids;
pub mod injury;
pub mod position;
pub mod time;

pub use ids::PlayerId;
pub use injury::InjuryStatus;
pub use position::Position;
pub use time::{Season, Week};
