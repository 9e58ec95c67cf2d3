// Command-line arguments and how they override the loaded configuration.

use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use waiverwire_core::config::Config;

#[derive(Debug, Parser)]
#[command(name = "waiverwire")]
#[command(about = "Waiver pickups, drop candidates and sit/start alerts for a Sleeper league")]
#[command(version)]
pub struct Args {
    /// Directory holding config/ and defaults/ (default: working directory,
    /// falling back to the per-user config directory)
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// NFL week to analyze, overriding league.current_week
    #[arg(short, long)]
    pub week: Option<u32>,

    /// Skip forum sentiment lookups and forum trends
    #[arg(long)]
    pub no_sentiment: bool,

    /// Directory reports are written to, overriding report.output_dir
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Print the owner's leagues for the configured season and exit
    #[arg(long)]
    pub list_leagues: bool,
}

impl Args {
    pub fn apply_overrides(&self, config: &mut Config) -> anyhow::Result<()> {
        if let Some(week) = self.week {
            if !(1..=18).contains(&week) {
                bail!("--week must be between 1 and 18, got {week}");
            }
            config.league.current_week = week;
        }
        if self.no_sentiment {
            config.analysis.include_sentiment = false;
        }
        if let Some(dir) = &self.output_dir {
            config.report.output_dir = dir.display().to_string();
        }
        Ok(())
    }
}
