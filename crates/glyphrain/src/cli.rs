//! Command line flags.

use std::path::PathBuf;

use clap::Parser;

/// Falling-glyph digital rain for your terminal.
///
/// Press `o` while the rain runs to open the options menu, `q` to quit.
#[derive(Debug, Parser)]
#[command(name = "glyphrain", version, about, long_about = None)]
pub struct Cli {
    /// Settings file to load and save instead of the default location
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write a debug log
    #[arg(long)]
    pub debug: bool,

    /// Debug log file, implies --debug
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Size the grid to the terminal and follow resizes
    #[arg(long)]
    pub fit: bool,

    /// Seed for a reproducible animation
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Skip the intro banner
    #[arg(long)]
    pub no_intro: bool,

    /// Do not look for a newer release at startup
    #[arg(long)]
    pub no_update_check: bool,
}

impl Cli {
    pub fn debug_enabled(&self) -> bool {
        self.debug || self.log_file.is_some()
    }
}
