//! # HiveWatch CLI
//!
//! Evaluates snapshot documents into dashboard and status JSON.

use chrono::Utc;
use clap::{ArgAction, Parser, Subcommand};
use hivewatch_engine::logging::{self, codes};
use hivewatch_engine::results::DecisionVerdict;
use hivewatch_engine::{log_info, log_success, EngineConfig, SnapshotProcessor};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "hivewatch")]
#[command(about = "HiveWatch status engine", version)]
struct Cli {
    /// Engine configuration (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Pretty-print JSON output
    #[arg(long, global = true, default_value_t = false)]
    pretty: bool,
    /// Write output to a file instead of stdout
    #[arg(long, global = true)]
    output: Option<PathBuf>,
    /// Raise log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate every environment in a snapshot document
    Dashboard { input: PathBuf },
    /// Decision status for one environment
    Status {
        input: PathBuf,
        #[arg(long)]
        environment: Uuid,
        /// Exit with status 2 when the verdict is BLOCK
        #[arg(long, default_value_t = false)]
        fail_on_block: bool,
    },
    /// Validate an expected-set spec document without saving it
    ValidateSpecs { specs: PathBuf },
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let config = load_config(cli.config.as_deref())?;
    logging::init_global_logging(&config.logging)?;
    log_success!(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "HiveWatch CLI initialized",
        "version" => env!("CARGO_PKG_VERSION")
    );

    let processor = SnapshotProcessor::new(config);
    let out = Output {
        pretty: cli.pretty,
        path: cli.output,
    };

    match cli.command {
        Commands::Dashboard { input } => {
            let input = processor.load_input(&input)?;
            let dashboard = processor.dashboard(&input, Utc::now());
            out.write(&dashboard)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Status {
            input,
            environment,
            fail_on_block,
        } => {
            let input = processor.load_input(&input)?;
            let status = processor.status(&input, environment, Utc::now())?;
            eprintln!(
                "{}: {} ({} issues)",
                status.environment_name,
                status.verdict,
                status.issues.len()
            );
            out.write(&status)?;

            if fail_on_block && status.verdict == DecisionVerdict::Block {
                Ok(ExitCode::from(2))
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Commands::ValidateSpecs { specs } => {
            let document = processor.load_specs(&specs)?;
            let report = processor.validate_specs(&document)?;
            eprintln!("Expected sets: {}", report.summary());
            for rejection in &report.rejected {
                eprintln!("  [REJECTED] {}", rejection.reason);
            }
            out.write(&report)?;

            if report.is_valid() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let config = config.with_env_overrides()?;
    config.validate()?;
    Ok(config)
}

struct Output {
    pretty: bool,
    path: Option<PathBuf>,
}

impl Output {
    fn write<T: Serialize>(&self, value: &T) -> Result<(), Box<dyn std::error::Error>> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };

        match &self.path {
            Some(path) => {
                std::fs::write(path, json)?;
                log_info!("Results written", "path" => path.display());
            }
            None => println!("{}", json),
        }
        Ok(())
    }
}
