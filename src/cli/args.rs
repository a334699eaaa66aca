//! Command-line argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CardioPredict - terminal client for cardiovascular risk assessment
#[derive(Parser, Debug)]
#[command(name = "cardiopredict")]
#[command(version)]
#[command(about = "Assess cardiovascular risk via the CardioPredict prediction service", long_about = None)]
pub struct Args {
    /// Prediction endpoint URL (overrides the config file)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Model variant to preselect: random_forest, logistic_regression, decision_tree
    #[arg(short, long)]
    pub model: Option<String>,

    /// Directory PDF reports are saved into (current directory by default)
    #[arg(long)]
    pub report_dir: Option<PathBuf>,

    /// Verbosity level: -v (verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress banners and hints)
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run an interactive risk assessment (the default)
    Assess,

    /// Check whether the prediction service is reachable
    Check,

    /// Display current configuration
    Config,

    /// Print the medical disclaimer
    Disclaimer,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.verbose > 0 {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}
