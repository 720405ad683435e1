//! Command implementations for the CLI.

pub mod jobs;
pub mod migrate;
pub mod serve;
