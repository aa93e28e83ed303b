//! Browsing-time analyzer CLI library.
//!
//! This crate provides the `wt` command-line interface over the core
//! analysis engine.

mod cli;
pub mod commands;
mod config;
pub mod input;
pub mod render;

pub use cli::{Cli, Commands, ExportFormat, GroupbyMode, OutputArgs, QueryArgs};
pub use config::Config;
