// ABOUTME: Output formatting helpers for wprime-cli
// ABOUTME: Renders engine snapshots as text rows or JSON lines
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use anyhow::Result;
use chrono::{DateTime, Utc};
use wprime_balance::config::EngineSettings;
use wprime_balance::models::{BalanceTrend, EngineSnapshot};
use wprime_balance::output::OutputField;

/// Print the settings header shown before a run
pub fn display_settings(settings: &EngineSettings, field: OutputField) {
    println!("\n{}", settings.summary());
    println!("Field: {} ({})", field.label(), field.unit());
    println!("{}", "=".repeat(56));
    println!("TIME         POWER {:>10}  TREND", field.label());
    println!("{}", "-".repeat(56));
}

/// Print one snapshot as a text row
pub fn display_snapshot_row(snapshot: &EngineSnapshot, field: OutputField) {
    println!(
        "{:<10} {:>6}W {:>9}{}  {}",
        format_timestamp(snapshot.timestamp_millis),
        snapshot.last_power_watts.round() as i64,
        field.render(snapshot),
        field.unit(),
        trend_arrow(snapshot.trend)
    );
}

/// Print one snapshot as a JSON line
pub fn display_snapshot_json(snapshot: &EngineSnapshot) -> Result<()> {
    println!("{}", serde_json::to_string(snapshot)?);
    Ok(())
}

/// Print the closing summary of a run
pub fn display_final(snapshot: &EngineSnapshot, readings: usize) {
    println!("{}", "=".repeat(56));
    println!(
        "Readings: {readings}  Final W': {:.0} J ({:.1}%)",
        snapshot.w_prime_joules, snapshot.w_prime_percentage
    );
}

fn format_timestamp(timestamp_millis: Option<i64>) -> String {
    timestamp_millis
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map_or_else(|| "--:--:--".to_owned(), |time| time.format("%H:%M:%S").to_string())
}

const fn trend_arrow(trend: BalanceTrend) -> &'static str {
    match trend {
        BalanceTrend::Depleting => "v depleting",
        BalanceTrend::Recovering => "^ recovering",
        BalanceTrend::Steady => "= steady",
        BalanceTrend::Full => "  full",
    }
}
