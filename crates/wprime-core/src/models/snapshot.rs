// ABOUTME: Read-only engine snapshot published to display and recording consumers
// ABOUTME: Carries W' joules, percentage, CP, capacity, and the balance trend
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::config::{ConfigurationSnapshot, WPrimeModelType};
use crate::constants::output::{FULL_FRACTION, MAX_PERCENTAGE};
use serde::{Deserialize, Serialize};

/// Direction W' is moving, as shown by a trend arrow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceTrend {
    /// Power above CP, W' is being spent
    Depleting,
    /// Power below CP, W' is coming back
    Recovering,
    /// Power exactly at CP with W' not full
    Steady,
    /// W' is (nearly) full and power is not above CP
    Full,
}

impl BalanceTrend {
    /// Classify from the current power and fill fraction
    #[must_use]
    pub fn classify(power_watts: f64, critical_power_watts: f64, fraction: f64) -> Self {
        if power_watts > critical_power_watts {
            Self::Depleting
        } else if fraction >= FULL_FRACTION {
            Self::Full
        } else if power_watts < critical_power_watts {
            Self::Recovering
        } else {
            Self::Steady
        }
    }
}

/// Consistent view of the engine at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    /// Remaining W' (joules), within `[0, anaerobic_capacity_joules]`
    pub w_prime_joules: f64,
    /// Remaining W' as a percentage of capacity, within `[0, 100]`
    pub w_prime_percentage: f64,
    /// Critical power in effect (watts)
    pub critical_power_watts: f64,
    /// Anaerobic capacity in effect (joules)
    pub anaerobic_capacity_joules: f64,
    /// Model that produced the value
    pub model: WPrimeModelType,
    /// Most recent power (watts); 0 while no data is streaming
    pub last_power_watts: f64,
    /// Timestamp of the last sample the clock accepted
    pub timestamp_millis: Option<i64>,
    /// Trend derived from power and fill level
    pub trend: BalanceTrend,
}

impl EngineSnapshot {
    /// Build a snapshot, clamping joules and deriving percentage and trend
    #[must_use]
    pub fn new(
        w_prime_joules: f64,
        config: &ConfigurationSnapshot,
        last_power_watts: f64,
        timestamp_millis: Option<i64>,
    ) -> Self {
        let capacity = config.anaerobic_capacity_joules;
        let joules = w_prime_joules.clamp(0.0, capacity);
        let fraction = joules / capacity;
        Self {
            w_prime_joules: joules,
            w_prime_percentage: (fraction * MAX_PERCENTAGE).clamp(0.0, MAX_PERCENTAGE),
            critical_power_watts: config.critical_power_watts,
            anaerobic_capacity_joules: capacity,
            model: config.model,
            last_power_watts,
            timestamp_millis,
            trend: BalanceTrend::classify(last_power_watts, config.critical_power_watts, fraction),
        }
    }

    /// Snapshot of a completely full W' before any sample
    #[must_use]
    pub fn full(config: &ConfigurationSnapshot) -> Self {
        Self::new(config.anaerobic_capacity_joules, config, 0.0, None)
    }
}
