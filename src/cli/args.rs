use clap::Args;
use std::path::PathBuf;

/// Arguments for uppercasing data
#[derive(Args, Debug)]
pub struct UpcaseArgs {
    /// Input file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Output file (writes to stdout if not provided)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Force one kernel instead of the best available
    #[arg(short = 't', long, value_name = "TIER")]
    pub tier: Option<String>,
}

/// Arguments for reporting CPU support
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the throughput benchmark
#[derive(Args, Debug)]
pub struct BenchArgs {
    /// Input size in bytes (repeatable; defaults to the configured sizes)
    #[arg(short = 's', long = "size", value_name = "N")]
    pub sizes: Vec<usize>,

    /// Timed runs per tier and size
    #[arg(short = 'n', long)]
    pub iterations: Option<u32>,

    /// Untimed runs before measuring
    #[arg(long)]
    pub warmup: Option<u32>,

    /// Seed for input generation (random if not provided)
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for printing effective settings
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Output as JSON instead of TOML
    #[arg(long)]
    pub json: bool,
}
