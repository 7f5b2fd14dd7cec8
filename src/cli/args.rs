//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// envcheck - Verify that workshop software is installed and recent enough.
#[derive(Debug, Parser)]
#[command(name = "envcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Path to an extra config file, merged over the discovered ones
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Do not print system information after failures
    #[arg(long)]
    pub no_system_info: bool,

    /// Checks to run (default: the configured list)
    #[arg(value_name = "CHECKS")]
    pub checks: Vec<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Arguments for the default check run.
    pub fn check_args(&self) -> CheckArgs {
        CheckArgs {
            checks: self.checks.clone(),
            json: self.json,
            no_system_info: self.no_system_info,
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List every check envcheck knows about
    List(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for a check run.
#[derive(Debug, Clone, Default)]
pub struct CheckArgs {
    /// Checks to run; empty means the default list
    pub checks: Vec<String>,

    /// Print the report as JSON
    pub json: bool,

    /// Skip the system information block
    pub no_system_info: bool,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Only show the checks run by default
    #[arg(long)]
    pub defaults: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
