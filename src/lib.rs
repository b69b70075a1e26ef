//! Shared pieces of the botboard binaries: configuration loading and the
//! backfill CLI argument grammar.

pub mod cli;
pub mod config;
