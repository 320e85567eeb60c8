//! CLI argument parsing for tpatch

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tpatch")]
#[command(author, version, about = "Embed a script file into a JSON template variable", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute (defaults to `apply`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the script body into the template
    Apply(ApplyArgs),

    /// Print the script body escaped for a JSON string
    Escape {
        /// Script file (default: uploadSettings-enhanced.ps1 next to the binary)
        script: Option<PathBuf>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Self::Apply(ApplyArgs::default())
    }
}

#[derive(Args, Debug, Default, Clone)]
pub struct ApplyArgs {
    /// Script file (default: uploadSettings-enhanced.ps1 next to the binary)
    pub script: Option<PathBuf>,

    /// Template file (default: ../template.json relative to the binary)
    pub template: Option<PathBuf>,

    /// Output file (default: overwrite the template)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the patched template instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}
