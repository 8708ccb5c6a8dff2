//! Command line interface.

pub mod command;

use std::fmt;

use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Archives rain area radar images into the content branch
pub struct Cli {
    /// Map region name
    #[arg(short, long, value_enum, default_value_t = RegionName::Singapore)]
    pub region: RegionName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RegionName {
    /// weather.gov.sg rain areas of the past two hours
    Singapore,
    /// Latest met.gov.my radar swirl
    Malaysia,
}

impl fmt::Display for RegionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionName::Singapore => f.write_str("singapore"),
            RegionName::Malaysia => f.write_str("malaysia"),
        }
    }
}

/// Creates a progress bar.
pub fn create_progress_bar(size: u64, message: String) -> ProgressBar {
    let style = ProgressStyle::with_template("[{eta_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");

    ProgressBar::new(size).with_message(message).with_style(style)
}

// -- Tests -------------------------------------------------------------------
