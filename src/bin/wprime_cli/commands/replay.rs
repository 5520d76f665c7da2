// ABOUTME: Replay command for wprime-cli
// ABOUTME: Feeds a JSON-lines power recording through one engine and prints every snapshot
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::helpers::display::{
    display_final, display_settings, display_snapshot_json, display_snapshot_row,
};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;
use wprime_balance::config::EngineSettings;
use wprime_balance::engine::{WPrimeEngine, WPrimeOutput};
use wprime_balance::output::OutputField;
use wprime_balance::replay::read_replay;

/// Replay `input` and print a snapshot per reading
pub fn run(settings: &EngineSettings, input: &Path, field: OutputField, json: bool) -> Result<()> {
    let readings = read_replay(input)
        .with_context(|| format!("Failed to load recording {}", input.display()))?;
    info!(
        readings = readings.len(),
        file = %input.display(),
        "Replaying power recording"
    );

    let mut engine = WPrimeEngine::with_options(settings.configuration, settings.engine_options());
    if !json {
        display_settings(settings, field);
    }

    for reading in &readings {
        let snapshot = engine.ingest_reading(*reading);
        if json {
            display_snapshot_json(&snapshot)?;
        } else {
            display_snapshot_row(&snapshot, field);
        }
    }

    if !json {
        display_final(&engine.snapshot(), readings.len());
    }
    Ok(())
}
