//! CLI module for the Grotto API
//!
//! Provides subcommands for running the service:
//! - `serve`: run the API server (default)
//! - `migrate`: apply pending schema migrations and exit

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// Grotto API - private group link sharing
#[derive(Parser)]
#[command(name = "grotto")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,

    /// Apply pending schema migrations and exit
    Migrate,
}
