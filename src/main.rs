mod bootstrap;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use cost_splitter::cli::{handle_config_command, handle_run_command, RunArgs, RunStatus};
use cost_splitter::config::{Settings, DEFAULT_CONFIG_FILE};
use cost_splitter::services::S3ObjectSource;

#[derive(Parser)]
#[command(
    name = "cost-splitter",
    version,
    about = "Split a monthly cloud billing export into per-project cost buckets",
    long_about = "cost-splitter downloads last month's detailed billing export, \
                  totals the cost of one linked account and splits it into \
                  buckets by matching configured substrings against selected \
                  columns of each line item."
)]
struct Cli {
    /// Path to the YAML settings file
    #[arg(
        short,
        long,
        global = true,
        env = "COST_SPLITTER_CONFIG",
        default_value = DEFAULT_CONFIG_FILE
    )]
    config: PathBuf,

    /// Log level when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, classify and report on a month's billing export (default)
    Run(RunArgs),

    /// Validate the settings file and show what it resolves to
    Config,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    bootstrap::setup_logging(&cli.log_level);

    let settings = match Settings::load(&cli.config) {
        Ok(settings) => settings,
        Err(e) if e.is_config() => {
            eprintln!("Error: {}", e);
            eprintln!("Check {} and try again.", cli.config.display());
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    match cli.command {
        Some(Commands::Config) => {
            handle_config_command(&settings, &cli.config);
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Run(args)) => run(&settings, &args),
        None => run(&settings, &RunArgs::default()),
    }
}

fn run(settings: &Settings, args: &RunArgs) -> Result<ExitCode> {
    match handle_run_command(settings, args, &S3ObjectSource::new())? {
        RunStatus::Reported => Ok(ExitCode::SUCCESS),
        RunStatus::ArchiveMissing => Ok(ExitCode::from(2)),
    }
}
