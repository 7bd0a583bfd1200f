/// Command-line options.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "blitz")]
#[command(about = "Flatten the city before your plane runs out of sky")]
pub struct Config {
    /// Start with sound off (toggle in game with S)
    #[arg(long)]
    pub mute: bool,

    /// WAV file for the explosion; a synthesized burst is used otherwise
    #[arg(long, value_name = "PATH")]
    pub explosion: Option<PathBuf>,

    /// Seed for skyline generation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where log output goes [default: blitz.log in the temp directory]
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("blitz.log"))
    }
}
