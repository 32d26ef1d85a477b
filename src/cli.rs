//! CLI argument parsing via clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Bootstrap a theme checkout by running its dependency installers in parallel.
#[derive(Debug, Parser)]
#[command(name = "elebee", version = crate::build_info::CLI_VERSION_TEXT)]
pub struct Args {
    /// Path to config file (default: ./elebee.toml or ~/.config/elebee/elebee.toml).
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Disable color output.
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Emit debug diagnostics on stderr (overridden by ELEBEE_LOG).
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run every configured install step concurrently in the theme directory.
    Init {
        /// Theme directory (default: install.theme_dir, then the current directory).
        #[arg(long = "dir")]
        dir: Option<PathBuf>,

        /// Exit non-zero when any install step fails.
        #[arg(long = "strict")]
        strict: bool,

        /// Print the batch report as JSON on stdout.
        #[arg(long = "json")]
        json: bool,
    },
    /// Run one shell command with stderr streaming and exit with its code.
    Exec {
        /// Working directory for the command.
        #[arg(long = "cwd")]
        cwd: Option<PathBuf>,

        /// Extra environment entry for the command (repeatable).
        #[arg(long = "env", value_name = "KEY=VALUE")]
        env: Vec<String>,

        /// Command to run. A single argument is a full shell command line;
        /// several arguments are quoted word by word.
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
    /// Write the resolved install settings to elebee.toml in the theme directory.
    Config {
        /// Theme directory (default: install.theme_dir, then the current directory).
        #[arg(long = "dir")]
        dir: Option<PathBuf>,

        /// Overwrite an existing elebee.toml.
        #[arg(long = "force")]
        force: bool,
    },
}
