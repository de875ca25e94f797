//! Projection engine
//!
//! Estimates a player's fantasy points for an upcoming week from realized
//! points history, depth-chart role and injury status:
//! - `config`: the named tuning options and their validation
//! - `engine`: the recency/role/injury heuristic and batch helpers

pub mod config;
pub mod engine;

pub use config::ProjectionConfig;
pub use engine::{
    project, project_batch, rank_projections, ProjectionBasis, ProjectionInput,
    ProjectionResult, WeightedWeek, WeeklyPoints,
};
