//! # ih8sn CLI Module
//!
//! One required positional argument selects the stage:
//!
//! - `init` - build identity, product names, model, `ro.secure`
//! - `boot_completed` - version strings, patch dates, boot-state lockdown
//!
//! Options only matter for dry runs and custom images; init never passes any.

mod commands;

use clap::Parser;
use ih8sn_core::primitives::DEFAULT_CONFIG_PATH;
use ih8sn_core::{Ih8snError, Stage};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// ih8sn - device identity property overrides
///
/// Reads a key=value file and rewrites build and verified-boot properties
/// for the given boot stage.
#[derive(Parser, Debug)]
#[command(name = "ih8sn")]
#[command(version, about, long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Boot stage: "init" or "boot_completed"
    #[arg(value_parser = parse_stage)]
    pub stage: Stage,

    /// Base configuration path; device-qualified variants are tried first
    #[arg(short, long, env = "IH8SN_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Run against a property dump (name=value or getprop format) instead of
    /// the native store
    #[arg(short, long)]
    pub snapshot: Option<PathBuf>,

    /// Print the resulting properties as JSON (snapshot runs only)
    #[arg(long, requires = "snapshot")]
    pub print: bool,
}

fn parse_stage(arg: &str) -> Result<Stage, Ih8snError> {
    arg.parse()
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), Ih8snError> {
    match cli.snapshot {
        Some(snapshot) => cmd_snapshot(cli.stage, &cli.config, &snapshot, cli.print).map(|_| ()),
        None => cmd_native(cli.stage, &cli.config),
    }
}
