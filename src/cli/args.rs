//! Command-line argument parsing for ReadHero
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// ReadHero - reading-comprehension training in the terminal
#[derive(Parser, Debug)]
#[command(name = "readhero")]
#[command(version)]
#[command(about = "Train reading comprehension skills with mastery tracking, XP and badges", long_about = None)]
pub struct Args {
    /// Directory containing texts.json (and optional texts_extra.json)
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// State directory override (default ~/.readhero/state)
    #[arg(long)]
    pub state_dir: Option<PathBuf>,

    /// Configuration file path (default ~/.readhero/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbosity level: default (normal), -v (debug), -vv (trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand (dashboard when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show progress, skills, streak and the text list
    Dashboard,

    /// Play a text
    Play {
        /// Play mode
        #[arg(long, value_enum, default_value_t = PlayMode::Practice)]
        mode: PlayMode,

        /// Specific text id (practice mode only)
        #[arg(long)]
        text: Option<u32>,
    },

    /// Show detailed skill mastery and badges
    Stats,

    /// Show the certificate, or the requirements still missing
    Certificate,

    /// Check a certificate verification code
    Verify {
        /// Verification code (RH-XXXXXXXX)
        code: String,
    },

    /// Export a progress report as CSV
    Export {
        /// Output file (defaults to readhero_report.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Erase all student data
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Play mode selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlayMode {
    /// Free practice with immediate feedback
    Practice,
    /// Today's challenge
    Daily,
    /// Timed exam
    Exam,
}

impl Args {
    /// Tracing filter directive for the chosen verbosity
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "readhero=warn",
            1 => "readhero=debug",
            _ => "readhero=trace",
        }
    }
}
