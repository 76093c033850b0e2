//! Subcommand implementations.

pub mod complete;
pub mod config;
