//! CLI for the Reels Info Extractor. Stands in for the host command palette.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use reels_core::config::{self, ReelsConfig};
use std::path::{Path, PathBuf};

use commands::{run_check, run_commands, run_completions, run_extract, run_man};

/// Top-level CLI for the Reels Info Extractor.
#[derive(Debug, Parser)]
#[command(name = "reels")]
#[command(about = "Reels Info Extractor: collect and check social video links", long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of ~/.config/reels/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Extract Restaurant Info from Video: prompt for a video link and check it.
    Extract,

    /// Check a link without prompting.
    Check {
        /// YouTube, Instagram or TikTok video link.
        link: String,
    },

    /// List the commands the plugin registers.
    Commands,

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print the man page to stdout.
    Man,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Completions { shell } => return run_completions(shell),
            CliCommand::Man => return run_man(),
            _ => {}
        }

        let cfg = load_config(cli.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Extract => run_extract(&cfg).await?,
            CliCommand::Check { link } => run_check(&cfg, &link),
            CliCommand::Commands => run_commands(&cfg)?,
            CliCommand::Completions { .. } | CliCommand::Man => {}
        }

        Ok(())
    }
}

/// An explicit `--config` must load; the default location falls back to
/// built-in defaults so a broken config never blocks the command.
fn load_config(path: Option<&Path>) -> Result<ReelsConfig> {
    match path {
        Some(p) => config::load_from(p),
        None => Ok(config::load_or_init().unwrap_or_else(|e| {
            tracing::warn!("using default config: {:#}", e);
            ReelsConfig::default()
        })),
    }
}

#[cfg(test)]
mod tests;
