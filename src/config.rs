//! Configuration and CLI argument handling

use clap::Parser;

use crate::clock::TimeFormat;

/// CLI argument parsing structure
#[derive(Parser)]
#[command(name = "hourglass")]
#[command(about = "A terminal countdown timer")]
#[command(version)]
pub struct Config {
    /// Countdown duration in seconds
    #[arg(short, long, default_value = "60")]
    pub duration: u64,

    /// Tick interval in milliseconds
    #[arg(short, long, default_value = "100")]
    pub interval: u64,

    /// Display format: h:mm:ss, h:mm:ss.mmm, m:ss, m:ss.mmm, s, s.mmm
    #[arg(short, long, default_value = "m:ss")]
    pub format: TimeFormat,

    /// Restart the countdown automatically each time it completes
    #[arg(long = "loop")]
    pub looping: bool,

    /// Tick at display refresh cadence instead of a fixed interval
    #[arg(long)]
    pub frame_sync: bool,

    /// Print the final timer snapshot as JSON on exit
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Countdown duration in milliseconds
    pub fn total_ms(&self) -> u64 {
        self.duration.saturating_mul(1_000)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
