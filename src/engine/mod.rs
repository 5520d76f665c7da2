// ABOUTME: W' integration engine owning the model state store, sample clock, and published snapshot
// ABOUTME: Applies configuration edits and integrates power samples with the active model's rule
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Integration Engine
//!
//! [`WPrimeEngine`] is the single writer of the model state. It has two entry
//! points:
//!
//! - [`WPrimeEngine::apply_configuration`]: complete replacement of the
//!   athlete parameters. A model switch resets W' to full; a capacity edit
//!   under the same model keeps the remaining fraction.
//! - [`WPrimeEngine::ingest_sample`]: integrate the active model over the time
//!   since the previous sample and return the remaining joules.
//!
//! After every call the engine holds a fresh [`EngineSnapshot`] which it
//! exposes through [`WPrimeOutput`].

mod clock;
mod port;

pub use clock::{ClockStep, SampleClock};
pub use port::WPrimeOutput;

use crate::algorithms::{IntegrationStep, ModelState};
use crate::constants::timing::DEFAULT_MAX_SAMPLE_GAP_MILLIS;
use crate::models::{ConfigurationSnapshot, EngineSnapshot, PowerReading, PowerSample};
use tracing::{debug, trace, warn};

/// Engine tuning that is not part of the athlete configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Sample gaps longer than this count as zero elapsed time (milliseconds).
    /// Zero or negative disables the ceiling.
    pub max_sample_gap_millis: i64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_sample_gap_millis: DEFAULT_MAX_SAMPLE_GAP_MILLIS,
        }
    }
}

/// Real-time W' balance engine
#[derive(Debug, Clone)]
pub struct WPrimeEngine {
    config: ConfigurationSnapshot,
    state: ModelState,
    clock: SampleClock,
    last_power_watts: f64,
    snapshot: EngineSnapshot,
}

impl Default for WPrimeEngine {
    fn default() -> Self {
        Self::new(ConfigurationSnapshot::default())
    }
}

impl WPrimeEngine {
    /// Engine with a full W' under `config` and default options
    #[must_use]
    pub fn new(config: ConfigurationSnapshot) -> Self {
        Self::with_options(config, EngineOptions::default())
    }

    /// Engine with a full W' under `config`
    #[must_use]
    pub fn with_options(config: ConfigurationSnapshot, options: EngineOptions) -> Self {
        let config = config.normalized();
        Self {
            state: ModelState::full(&config),
            clock: SampleClock::new(options.max_sample_gap_millis),
            last_power_watts: 0.0,
            snapshot: EngineSnapshot::full(&config),
            config,
        }
    }

    /// Replace the configuration
    ///
    /// Values below their floors are clamped, never rejected. CP, tau and
    /// `k_in` edits apply from the next sample without touching the state.
    pub fn apply_configuration(&mut self, snapshot: &ConfigurationSnapshot) -> EngineSnapshot {
        let next = snapshot.normalized();
        let previous = self.config;

        if next.model != previous.model {
            debug!(
                from = %previous.model,
                to = %next.model,
                "W' model changed, resetting balance to full"
            );
            self.state = ModelState::full(&next);
        } else if (next.anaerobic_capacity_joules - previous.anaerobic_capacity_joules).abs()
            > f64::EPSILON
        {
            debug!(
                model = %next.model,
                old_capacity_j = previous.anaerobic_capacity_joules,
                new_capacity_j = next.anaerobic_capacity_joules,
                "Anaerobic capacity changed, rescaling balance"
            );
            self.state.rescale_capacity(
                previous.anaerobic_capacity_joules,
                next.anaerobic_capacity_joules,
            );
        }

        self.config = next;
        debug!(config = %self.config.summary(), "Configuration applied");
        self.publish()
    }

    /// Integrate one sample and return the remaining W' (joules)
    pub fn ingest_sample(&mut self, watts: f64, timestamp_millis: i64) -> f64 {
        self.ingest(PowerSample::new(watts, timestamp_millis))
            .w_prime_joules
    }

    /// Integrate one sample and return the resulting snapshot
    pub fn ingest(&mut self, sample: PowerSample) -> EngineSnapshot {
        let sample = PowerSample::new(sample.watts, sample.timestamp_millis);
        let step = self.clock.advance(sample.timestamp_millis);
        self.last_power_watts = sample.watts;

        match step {
            ClockStep::Elapsed { millis } => {
                debug_assert_eq!(
                    self.state.model(),
                    self.config.model,
                    "model state out of sync with configuration"
                );
                let integration =
                    IntegrationStep::new(&self.config, sample.watts, step.seconds());
                self.state.advance(&integration);
                trace!(
                    model = %self.config.model,
                    watts = sample.watts,
                    dt_ms = millis,
                    balance_j = self.state.balance(&self.config),
                    "Integrated power sample"
                );
            }
            ClockStep::Bootstrap => {
                trace!(
                    timestamp_ms = sample.timestamp_millis,
                    "First power sample, no integration"
                );
            }
            ClockStep::OutOfOrder => {
                trace!(
                    timestamp_ms = sample.timestamp_millis,
                    last_ms = ?self.clock.last_timestamp_millis(),
                    "Out-of-order power sample, no integration"
                );
            }
            ClockStep::GapExceeded { gap_millis } => {
                warn!(
                    gap_ms = gap_millis,
                    ceiling_ms = self.clock.max_gap_millis(),
                    "Power sample gap exceeds ceiling, treating as no elapsed time"
                );
            }
        }

        self.publish()
    }

    /// Handle any reading from the power stream
    ///
    /// Sentinels integrate nothing; they republish the held balance with the
    /// power reported as zero.
    pub fn ingest_reading(&mut self, reading: PowerReading) -> EngineSnapshot {
        match reading {
            PowerReading::Streaming(sample) => self.ingest(sample),
            PowerReading::Searching | PowerReading::NotAvailable => {
                trace!(reading = ?reading, "No power data, holding balance");
                self.last_power_watts = 0.0;
                self.publish()
            }
        }
    }

    /// Configuration in effect
    #[must_use]
    pub const fn config(&self) -> &ConfigurationSnapshot {
        &self.config
    }

    /// Active model state
    #[must_use]
    pub const fn state(&self) -> &ModelState {
        &self.state
    }

    fn publish(&mut self) -> EngineSnapshot {
        self.snapshot = EngineSnapshot::new(
            self.state.balance(&self.config),
            &self.config,
            self.last_power_watts,
            self.clock.last_timestamp_millis(),
        );
        self.snapshot
    }
}

impl WPrimeOutput for WPrimeEngine {
    fn snapshot(&self) -> EngineSnapshot {
        self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BalanceTrend, WPrimeModelType};

    #[test]
    fn test_new_engine_is_full() {
        let engine = WPrimeEngine::default();
        assert!((engine.w_prime_joules() - 12_000.0).abs() < f64::EPSILON);
        assert!((engine.w_prime_percentage() - 100.0).abs() < f64::EPSILON);
        assert!((engine.critical_power_watts() - 250.0).abs() < f64::EPSILON);
        assert!((engine.anaerobic_capacity_joules() - 12_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_configuration_is_clamped() {
        let mut engine = WPrimeEngine::default();
        let snapshot = engine.apply_configuration(&ConfigurationSnapshot {
            critical_power_watts: 0.0,
            anaerobic_capacity_joules: -10.0,
            ..ConfigurationSnapshot::default()
        });
        assert!(snapshot.critical_power_watts >= 1.0);
        assert!(snapshot.anaerobic_capacity_joules >= 1.0);
        assert!((0.0..=100.0).contains(&snapshot.w_prime_percentage));
    }

    #[test]
    fn test_cp_edit_keeps_state() {
        let mut engine = WPrimeEngine::default();
        engine.ingest_sample(350.0, 0);
        let before = engine.ingest_sample(350.0, 10_000);
        let snapshot = engine.apply_configuration(&ConfigurationSnapshot {
            critical_power_watts: 300.0,
            ..ConfigurationSnapshot::default()
        });
        assert!((snapshot.w_prime_joules - before).abs() < f64::EPSILON);

        // 350 W against the new 300 W CP spends 50 J/s
        let after = engine.ingest_sample(350.0, 11_000);
        assert!((before - after - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_sentinel_holds_balance_and_reports_zero_power() {
        let mut engine = WPrimeEngine::new(ConfigurationSnapshot::for_model(
            WPrimeModelType::SkibaDifferential,
        ));
        engine.ingest_sample(400.0, 0);
        let held = engine.ingest_sample(400.0, 5_000);

        let snapshot = engine.ingest_reading(PowerReading::Searching);
        assert!((snapshot.w_prime_joules - held).abs() < f64::EPSILON);
        assert!(snapshot.last_power_watts.abs() < f64::EPSILON);
        assert_eq!(snapshot.trend, BalanceTrend::Recovering);
        assert_eq!(snapshot.timestamp_millis, Some(5_000));
    }

    #[test]
    fn test_negative_watts_are_floored() {
        let mut engine = WPrimeEngine::default();
        engine.ingest_sample(-100.0, 0);
        let snapshot = engine.ingest(PowerSample {
            watts: -100.0,
            timestamp_millis: 1_000,
        });
        assert!(snapshot.last_power_watts.abs() < f64::EPSILON);
        assert!((snapshot.w_prime_joules - 12_000.0).abs() < f64::EPSILON);
    }
}
