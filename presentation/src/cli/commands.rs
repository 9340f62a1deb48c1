//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for replies
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Assistant text for the terminal
    Text,
    /// One JSON object per reply
    Json,
}

/// CLI arguments for seismic-chat
#[derive(Parser, Debug)]
#[command(name = "seismic-chat")]
#[command(author, version, about = "Natural-language front end for seismic modeling tools")]
#[command(long_about = r#"
Seismic Chat maps plain-English requests onto seismic modeling tools and
remembers what earlier turns produced.

Available tools:
  make_ricker            Create a Ricker wavelet ("a 30 Hz ricker wavelet")
  plot_ricker            Plot the wavelet and its spectra ("plot it")
  compute_reflectivity   Reflectivity from layer velocities ("velocities [2000, 3000]")

Configuration files are loaded from (in priority order):
1. SEISMIC_CHAT_* environment variables
2. --config <path>          Explicit config file
3. ./seismic-chat.toml or ./.seismic-chat.toml   Project-level config
4. ~/.config/seismic-chat/config.toml   Global config

Example:
  seismic-chat "Create a 25 Hz Ricker wavelet"
  seismic-chat "Compute reflectivity for velocities [2000, 3000, 2500, 4000]"
  seismic-chat --chat
"#)]
pub struct Cli {
    /// A single request to answer (not required in chat mode)
    pub message: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// List the registered tools and exit
    #[arg(long)]
    pub list_tools: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Directory for rendered figures (overrides [artifacts] dir)
    #[arg(long, value_name = "DIR")]
    pub artifact_dir: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the welcome banner and non-essential output
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
