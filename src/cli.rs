//! CLI argument definitions for Packy.
//!
//! Kept apart from the entrypoint so the binary stays focused on
//! orchestration and the parser can be unit tested.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use log::LevelFilter;

/// Validate and zip resource pack folders.
#[derive(Parser, Debug)]
#[command(name = "packy")]
#[command(version, about)]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Check a pack's manifest:\n",
    "    $ packy validate ./my_pack\n\n",
    "  Validate and zip into packs/ beside the packy binary:\n",
    "    $ packy zip ./my_pack\n\n",
    "  Zip to an explicit path:\n",
    "    $ packy zip ./my_pack --output ~/Desktop/my_pack.zip\n",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file [default: ./packy.toml when present].
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Increase log verbosity (repeatable: -v, -vv, -vvv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Suppress progress output (errors still shown).
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Validate a pack folder, then zip it.
    Zip(ZipArgs),

    /// Validate a pack folder's manifest.json only.
    Validate(ValidateArgs),
}

/// Arguments for the zip command.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
pub struct ZipArgs {
    /// Path to the resource pack folder.
    #[arg(value_name = "FOLDER")]
    pub folder: String,

    /// Output zip path [default: <packs dir>/<folder name>.zip].
    #[arg(short, long, value_name = "ZIP")]
    pub output: Option<String>,

    /// Directory for default output paths, overriding the config file.
    #[arg(long, value_name = "DIR")]
    pub packs_dir: Option<Utf8PathBuf>,
}

/// Arguments for the validate command.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
pub struct ValidateArgs {
    /// Path to the resource pack folder.
    #[arg(value_name = "FOLDER")]
    pub folder: String,
}

impl Cli {
    /// Return the log level implied by `--quiet` and `-v` flags.
    ///
    /// `RUST_LOG`, when set, still takes precedence at logger setup.
    #[must_use]
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
