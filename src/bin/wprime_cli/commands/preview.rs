// ABOUTME: Preview command for wprime-cli
// ABOUTME: Streams synthetic power through a W' session and prints what a display field would show
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::helpers::display::{display_final, display_settings, display_snapshot_row};
use anyhow::Result;
use futures_util::{stream, StreamExt};
use std::time::Duration;
use tracing::info;
use wprime_balance::config::EngineSettings;
use wprime_balance::engine::{WPrimeEngine, WPrimeOutput};
use wprime_balance::models::{ConfigurationSnapshot, PowerReading};
use wprime_balance::output::OutputField;
use wprime_balance::preview::PreviewPowerSource;
use wprime_balance::session::WPrimeSession;

/// Run `seconds` of preview power through a session
pub async fn run(
    settings: &EngineSettings,
    seconds: u64,
    seed: Option<u64>,
    interval_ms: u64,
    field: OutputField,
) -> Result<()> {
    let critical_power = settings.configuration.critical_power_watts;
    let source = seed.map_or_else(
        || PreviewPowerSource::new(critical_power),
        |seed| PreviewPowerSource::with_seed(critical_power, seed),
    );
    info!(seconds, seed = ?seed, "Starting preview power source");

    let interval = Duration::from_millis(interval_ms);
    let samples = stream::iter(source.take(seconds as usize)).then(move |sample| async move {
        if !interval.is_zero() {
            tokio::time::sleep(interval).await;
        }
        PowerReading::Streaming(sample)
    });
    let engine = WPrimeEngine::with_options(settings.configuration, settings.engine_options());
    let session = WPrimeSession::spawn(engine, samples, stream::empty::<ConfigurationSnapshot>());

    display_settings(settings, field);
    let mut reader = session.reader();
    // The reader may skip intermediate snapshots when sampling outpaces printing
    while reader.changed().await {
        display_snapshot_row(&reader.latest(), field);
    }

    let engine = session.finished().await?;
    display_final(&engine.snapshot(), seconds as usize);
    Ok(())
}
