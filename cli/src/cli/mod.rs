//! CLI module for binstar.

pub mod args;
pub mod commands;

pub use args::{AuthArgs, AuthMode, Cli, Commands};
