use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    /// Configuration file (defaults to ~/.gridview/config.toml)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a synthetic grid from a scenario file
    Generate {
        /// Scenario file (YAML or JSON)
        #[arg(long, value_hint = ValueHint::FilePath)]
        scenario: PathBuf,
        /// Write the grid JSON here instead of stdout
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        out: Option<PathBuf>,
    },
    /// Print entities, fuses and cables of a grid JSON file
    Inspect {
        /// Grid JSON file
        #[arg(value_hint = ValueHint::FilePath)]
        grid: PathBuf,
    },
    /// Toggle a fuse and export the resulting grid
    Switch {
        /// Grid JSON file
        #[arg(value_hint = ValueHint::FilePath)]
        grid: PathBuf,
        /// Fuse id to toggle
        #[arg(long)]
        fuse: usize,
        /// Write the grid JSON here instead of stdout
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        out: Option<PathBuf>,
    },
    /// Report energized islands (entities joined by cables with both fuses closed)
    Islands {
        /// Grid JSON file
        #[arg(value_hint = ValueHint::FilePath)]
        grid: PathBuf,
    },
}
