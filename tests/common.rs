// ABOUTME: Shared test utilities for W' engine integration tests
// ABOUTME: Provides quiet logging setup and helpers that feed the engine steady 1 Hz power
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::cast_precision_loss
)]
//! Shared test utilities for `wprime_balance`

use std::sync::Once;
use wprime_balance::engine::WPrimeEngine;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Feed `seconds` samples of constant `watts` at 1 Hz, starting one second
/// after `start_millis`, and return the balance after each sample
pub fn hold_power(
    engine: &mut WPrimeEngine,
    watts: f64,
    seconds: i64,
    start_millis: i64,
) -> Vec<f64> {
    (1..=seconds)
        .map(|second| engine.ingest_sample(watts, start_millis + second * 1000))
        .collect()
}

/// Assert `values` never increases
pub fn assert_non_increasing(values: &[f64], context: &str) {
    for pair in values.windows(2) {
        assert!(
            pair[1] <= pair[0] + 1e-9,
            "{context}: balance rose from {} to {}",
            pair[0],
            pair[1]
        );
    }
}

/// Assert `values` never decreases
pub fn assert_non_decreasing(values: &[f64], context: &str) {
    for pair in values.windows(2) {
        assert!(
            pair[1] + 1e-9 >= pair[0],
            "{context}: balance fell from {} to {}",
            pair[0],
            pair[1]
        );
    }
}
