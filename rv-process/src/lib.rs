//! Command implementations for the recycling data CLI.
//!
//! Prepares the processed JSON datasets the dashboard loads, checks them and
//! prints quick summaries of raw or processed files.

use clap::Subcommand;

pub mod inspect;
pub mod process;
pub mod raw;
pub mod validate;

#[derive(Subcommand)]
pub enum Command {
    /// Build the processed datasets from the raw inputs
    Process {
        /// Directory holding the raw density, recycling, world and GDP files
        #[arg(short = 'r', long, default_value = "data/raw")]
        raw_dir: String,

        /// Output directory for the processed JSON files
        #[arg(short = 'o', long, default_value = "data/processed")]
        out_dir: String,
    },

    /// Check the processed datasets for shape and value problems
    Validate {
        /// Directory holding the processed JSON files
        #[arg(short = 'd', long, default_value = "data/processed")]
        dir: String,
    },

    /// Print row count, columns and the first rows of a JSON or CSV file
    Inspect {
        file: String,

        /// Number of rows to show
        #[arg(short = 'n', long, default_value_t = 5)]
        head: usize,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Process { raw_dir, out_dir } => process::run_process(&raw_dir, &out_dir),
        Command::Validate { dir } => validate::run_validate(&dir),
        Command::Inspect { file, head } => inspect::run_inspect(&file, head),
    }
}
