// ABOUTME: Power sample and power reading types delivered by a power sensor stream
// ABOUTME: Readings are either a timestamped wattage or a searching/unavailable sentinel
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use serde::{Deserialize, Serialize};

/// A single timestamped power value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerSample {
    /// Power output (watts), never negative
    pub watts: f64,
    /// Sample time (milliseconds, monotonic within a session)
    pub timestamp_millis: i64,
}

impl PowerSample {
    /// Create a sample, flooring negative or non-finite wattage at zero
    #[must_use]
    pub fn new(watts: f64, timestamp_millis: i64) -> Self {
        let watts = if watts.is_finite() { watts.max(0.0) } else { 0.0 };
        Self {
            watts,
            timestamp_millis,
        }
    }
}

/// What the power sensor stream delivered
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PowerReading {
    /// Sensor is streaming a value
    Streaming(PowerSample),
    /// Sensor is being searched for
    Searching,
    /// Sensor is not available
    NotAvailable,
}

impl PowerReading {
    /// Streaming reading with sanitized wattage
    #[must_use]
    pub fn streaming(watts: f64, timestamp_millis: i64) -> Self {
        Self::Streaming(PowerSample::new(watts, timestamp_millis))
    }

    /// The sample carried by this reading, if any
    #[must_use]
    pub const fn sample(&self) -> Option<PowerSample> {
        match self {
            Self::Streaming(sample) => Some(*sample),
            Self::Searching | Self::NotAvailable => None,
        }
    }
}
