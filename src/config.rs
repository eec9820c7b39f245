//! Startup configuration: input file and sampling parameters.

use std::path::PathBuf;

use clap::Parser;

/// File read when no `--input` is given.
pub const DEFAULT_INPUT: &str = "Imports_Exports_Dataset (1).csv";
/// Rows drawn from the dataset.
pub const DEFAULT_SAMPLE_SIZE: usize = 3001;
/// Seed for the sampling RNG.
pub const DEFAULT_SEED: u64 = 55006;

/// Command line of the dashboard binary.
#[derive(Parser, Debug, Clone)]
#[command(version, about = "Dashboard for imports and exports")]
pub struct Cli {
    /// CSV file with the transactions
    #[arg(long, default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Number of rows to sample from the file
    #[arg(long, default_value_t = DEFAULT_SAMPLE_SIZE)]
    pub sample_size: usize,

    /// Seed for the sampling RNG
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
}

/// Parameters that decide which rows the dashboard works on.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub input: PathBuf,
    pub sample_size: usize,
    pub seed: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            sample_size: DEFAULT_SAMPLE_SIZE,
            seed: DEFAULT_SEED,
        }
    }
}

impl From<Cli> for DashboardConfig {
    fn from(cli: Cli) -> Self {
        Self {
            input: cli.input,
            sample_size: cli.sample_size,
            seed: cli.seed,
        }
    }
}
