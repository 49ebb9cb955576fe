// ABOUTME: Headway CLI - runs analysis passes over JSON diary exports
// ABOUTME: Handles full analysis, threshold learning and data-quality inspection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Full analysis pass, pretty JSON on stdout
//! headway-cli analyze --input diary.json
//!
//! # Read from stdin, single-line output
//! cat diary.json | headway-cli --compact analyze --input -
//!
//! # Seven-day horizon replaced by fourteen days
//! headway-cli analyze --input diary.json --horizon-days 14
//!
//! # Personal thresholds only
//! headway-cli thresholds --input diary.json
//!
//! # Data-quality report only
//! headway-cli quality --input diary.json
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use headway::intelligence::{AnalysisConfig, EnsembleNormalization, HeadacheAnalysisEngine};
use headway::logging::LoggingConfig;
use headway::{AppError, AppResult};
use tracing::info;

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "headway-cli",
    about = "Headway headache analysis CLI",
    long_about = "Runs the Headway correlation and risk-prediction engine over a JSON diary export and prints the result as JSON."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print single-line JSON instead of pretty JSON
    #[arg(long, global = true)]
    compact: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Run a full analysis pass
    Analyze {
        /// Input JSON file (`-` for stdin)
        #[arg(long, short = 'i')]
        input: PathBuf,

        /// Subject the pass is scheduled under
        #[arg(long, default_value = "cli")]
        subject: String,

        /// Forecast horizon in days (1-30)
        #[arg(long)]
        horizon_days: Option<u32>,

        /// Ensemble tier normalisation
        #[arg(long, value_enum)]
        normalization: Option<NormalizationArg>,
    },

    /// Print the personal thresholds the engine would use
    Thresholds {
        /// Input JSON file (`-` for stdin)
        #[arg(long, short = 'i')]
        input: PathBuf,
    },

    /// Print the data-quality assessment
    Quality {
        /// Input JSON file (`-` for stdin)
        #[arg(long, short = 'i')]
        input: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum NormalizationArg {
    /// Divide by the sum of weight times confidence
    ConfidenceWeighted,
    /// Divide by the sum of model weights
    ModelWeight,
}

impl From<NormalizationArg> for EnsembleNormalization {
    fn from(arg: NormalizationArg) -> Self {
        match arg {
            NormalizationArg::ConfidenceWeighted => Self::ConfidenceWeighted,
            NormalizationArg::ModelWeight => Self::ModelWeight,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging.level = "debug".into();
    }
    logging
        .init()
        .map_err(|e| AppError::internal(e.to_string()))?;

    info!("Headway CLI");

    match cli.command {
        Command::Analyze {
            input,
            subject,
            horizon_days,
            normalization,
        } => {
            let mut config = AnalysisConfig::from_environment()?;
            if let Some(days) = horizon_days {
                config.forecast.horizon_days = days;
            }
            if let Some(normalization) = normalization {
                config.ensemble.normalization = normalization.into();
            }
            let engine = HeadacheAnalysisEngine::new(config)?;
            commands::analyze::run(engine, &input, &subject, cli.compact).await?;
        }
        Command::Thresholds { input } => commands::inspect::thresholds(&input, cli.compact)?,
        Command::Quality { input } => commands::inspect::quality(&input, cli.compact)?,
    }

    Ok(())
}
