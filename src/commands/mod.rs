//! Command implementations for the ffl-engine CLI

pub mod common;
pub mod project;
pub mod score;
pub mod validate;


pub use common::CommandContext;
