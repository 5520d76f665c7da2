// ABOUTME: wprime-cli - command-line front end for the W' balance engine
// ABOUTME: Lists models, replays recorded power files, and runs the synthetic preview source
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
//!
//! Usage:
//! ```bash
//! # List supported W' models
//! wprime-cli models
//!
//! # Replay a JSON-lines power recording with the Bartram model
//! wprime-cli replay --input ride.jsonl --model bartram --tau 240
//!
//! # Emit one JSON snapshot per reading
//! wprime-cli replay --input ride.jsonl --json
//!
//! # Run two minutes of synthetic preview power through the engine
//! wprime-cli preview --seconds 120 --field joules
//! ```

mod commands;
mod helpers;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use wprime_balance::config::{EngineSettings, SettingsOverrides};
use wprime_balance::errors::AppError;
use wprime_balance::logging::LoggingConfig;
use wprime_balance::models::WPrimeModelType;
use wprime_balance::output::OutputField;

#[derive(Parser)]
#[command(
    name = "wprime-cli",
    about = "W' balance engine CLI",
    long_about = "Tracks remaining anaerobic work capacity (W') from power data under six W' balance models."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// List supported W' models and the parameters each one uses
    Models,

    /// Replay a JSON-lines power recording through the engine
    Replay {
        /// Recording file, one reading per line
        #[arg(long, short = 'i')]
        input: PathBuf,

        /// Print each snapshot as JSON instead of text
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Run the synthetic preview power source through the engine
    Preview {
        /// Simulated seconds to run
        #[arg(long, default_value = "120")]
        seconds: u64,

        /// Seed for reproducible noise
        #[arg(long)]
        seed: Option<u64>,

        /// Wall-clock delay between samples (milliseconds)
        #[arg(long, default_value = "0")]
        interval_ms: u64,

        #[command(flatten)]
        engine: EngineArgs,
    },
}

/// Engine overrides shared by the replay and preview commands
#[derive(Args)]
struct EngineArgs {
    /// W' model (e.g. `skiba_differential`, `bartram`, `weigend`)
    #[arg(long)]
    model: Option<WPrimeModelType>,

    /// Critical power (watts)
    #[arg(long)]
    cp: Option<f64>,

    /// Anaerobic work capacity W' (joules)
    #[arg(long = "w-prime")]
    w_prime: Option<f64>,

    /// Recovery time constant for the Bartram model (seconds)
    #[arg(long)]
    tau: Option<f64>,

    /// Inflow coefficient for the Weigend model
    #[arg(long = "k-in")]
    k_in: Option<f64>,

    /// Sample gap ceiling (milliseconds), 0 disables it
    #[arg(long)]
    max_gap_ms: Option<i64>,

    /// Display field: percent or joules
    #[arg(long, default_value = "percent")]
    field: OutputField,
}

impl EngineArgs {
    fn settings(&self) -> Result<EngineSettings> {
        let settings = EngineSettings::from_env()
            .map_err(AppError::from)
            .context("Failed to load engine settings")?;
        Ok(settings.with_overrides(&SettingsOverrides {
            model: self.model,
            critical_power_watts: self.cp,
            anaerobic_capacity_joules: self.w_prime,
            tau_recovery_seconds: self.tau,
            k_in: self.k_in,
            max_sample_gap_millis: self.max_gap_ms,
        }))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let logging = if cli.verbose {
        logging.with_level("debug")
    } else {
        logging
    };
    logging.init()?;

    match cli.command {
        Command::Models => commands::models::list(),
        Command::Replay {
            input,
            json,
            engine,
        } => {
            let settings = engine.settings()?;
            commands::replay::run(&settings, &input, engine.field, json)?;
        }
        Command::Preview {
            seconds,
            seed,
            interval_ms,
            engine,
        } => {
            let settings = engine.settings()?;
            commands::preview::run(&settings, seconds, seed, interval_ms, engine.field).await?;
        }
    }

    Ok(())
}
