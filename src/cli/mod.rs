mod args;
mod global;
mod handlers;

use args::{BenchArgs, ConfigArgs, InfoArgs, UpcaseArgs};
use clap::{Parser, Subcommand};
use global::GlobalArgs;
use simd_upcase::{Settings, Tier};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "simd-upcase")]
#[command(version)]
#[command(about = "Uppercase ASCII text with the widest SIMD unit your CPU has", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Uppercase a file or stdin
    Upcase(UpcaseArgs),
    /// Show detected CPU features and the selected kernel
    Info(InfoArgs),
    /// Verify every kernel and measure its throughput
    Bench(BenchArgs),
    /// Print the effective settings
    Config(ConfigArgs),
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut settings = Settings::load_with_overrides(cli.global.config.as_deref())?;
    if let Some(name) = &cli.global.max_tier {
        settings.dispatch.max_tier = Some(name.parse::<Tier>()?);
    }

    init_logging(&cli.global, &settings);

    match cli.command {
        Commands::Upcase(args) => handlers::upcase::handle(args, &cli.global, &settings),
        Commands::Info(args) => handlers::info::handle(args, &cli.global, &settings),
        Commands::Bench(args) => handlers::bench::handle(args, &cli.global, &settings),
        Commands::Config(args) => handlers::config::handle(args, &cli.global, &settings),
    }
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins, then `-v`/`-vv`, then the configured level.
fn init_logging(global: &GlobalArgs, settings: &Settings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directive = match global.verbose {
            0 => settings.log.level(),
            1 => "debug",
            _ => "trace",
        };
        EnvFilter::try_new(directive).unwrap_or_else(|_| {
            eprintln!("Warning: invalid log level '{}', using 'warn'", directive);
            EnvFilter::new("warn")
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
