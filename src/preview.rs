// ABOUTME: Synthetic power source for previewing W' fields without a power meter
// ABOUTME: Sine cycle between 0% and 160% of CP with uniform noise, one sample per simulated second
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::constants::floors::MIN_CRITICAL_POWER_WATTS;
use crate::constants::preview::{
    CYCLE_SECONDS, MAX_POWER_FRACTION, MIN_POWER_FRACTION, NOISE_FRACTION,
};
use crate::constants::timing::MILLIS_PER_SECOND;
use crate::models::PowerSample;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

/// Endless 1 Hz power samples around critical power
#[derive(Debug, Clone)]
pub struct PreviewPowerSource {
    critical_power_watts: f64,
    start_millis: i64,
    elapsed_seconds: u64,
    rng: StdRng,
}

impl PreviewPowerSource {
    /// Source seeded from OS entropy, timestamps starting at zero
    #[must_use]
    pub fn new(critical_power_watts: f64) -> Self {
        Self::from_rng(critical_power_watts, StdRng::from_entropy())
    }

    /// Reproducible source
    #[must_use]
    pub fn with_seed(critical_power_watts: f64, seed: u64) -> Self {
        Self::from_rng(critical_power_watts, StdRng::seed_from_u64(seed))
    }

    fn from_rng(critical_power_watts: f64, rng: StdRng) -> Self {
        Self {
            critical_power_watts: critical_power_watts.max(MIN_CRITICAL_POWER_WATTS),
            start_millis: 0,
            elapsed_seconds: 0,
            rng,
        }
    }

    /// Offset the first timestamp
    #[must_use]
    pub const fn starting_at(mut self, start_millis: i64) -> Self {
        self.start_millis = start_millis;
        self
    }

    /// Noise-free profile power at `simulation_seconds`
    #[must_use]
    pub fn profile_watts(&self, simulation_seconds: f64) -> f64 {
        let phase = (simulation_seconds % CYCLE_SECONDS) / CYCLE_SECONDS;
        let wave = (phase * TAU).sin().mul_add(0.5, 0.5);
        let fraction = wave.mul_add(MAX_POWER_FRACTION - MIN_POWER_FRACTION, MIN_POWER_FRACTION);
        self.critical_power_watts * fraction
    }

    /// Next sample, one simulated second after the previous one
    pub fn next_sample(&mut self) -> PowerSample {
        let seconds = self.elapsed_seconds as f64;
        let noise =
            self.critical_power_watts * NOISE_FRACTION * self.rng.gen_range(-1.0..=1.0);
        let watts = (self.profile_watts(seconds) + noise).max(0.0);
        let timestamp_millis = self.start_millis + (seconds * MILLIS_PER_SECOND) as i64;
        self.elapsed_seconds += 1;
        PowerSample::new(watts, timestamp_millis)
    }
}

impl Iterator for PreviewPowerSource {
    type Item = PowerSample;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_sample())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_spans_zero_to_160_percent_of_cp() {
        let source = PreviewPowerSource::with_seed(250.0, 7);
        assert!((source.profile_watts(0.0) - 200.0).abs() < 1e-9);
        assert!((source.profile_watts(7.5) - 400.0).abs() < 1e-9);
        assert!(source.profile_watts(22.5).abs() < 1e-9);
        assert!((source.profile_watts(30.0) - source.profile_watts(0.0)).abs() < 1e-9);
    }

    #[test]
    fn test_samples_stay_within_noise_band() {
        let mut source = PreviewPowerSource::with_seed(250.0, 42);
        for second in 0..120 {
            let sample = source.next_sample();
            let profile = source.profile_watts(f64::from(second));
            assert!(sample.watts >= 0.0);
            assert!(sample.watts <= profile + 12.5 + 1e-9);
            assert!(sample.watts >= profile - 12.5 - 1e-9);
            assert_eq!(sample.timestamp_millis, i64::from(second) * 1000);
        }
    }

    #[test]
    fn test_seeded_sources_are_reproducible() {
        let a: Vec<_> = PreviewPowerSource::with_seed(300.0, 9).take(10).collect();
        let b: Vec<_> = PreviewPowerSource::with_seed(300.0, 9)
            .starting_at(0)
            .take(10)
            .collect();
        assert_eq!(a, b);
    }
}
