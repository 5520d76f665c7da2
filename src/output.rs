// ABOUTME: Display field formatting for W' snapshots (percentage and joules fields)
// ABOUTME: Maps a snapshot to the streamed value, display text, unit, and label of each field
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::constants::output::MAX_PERCENTAGE;
use crate::errors::AppError;
use crate::models::{ConfigurationSnapshot, EngineSnapshot};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A W' display field
///
/// Fields are read-only subscribers: they format whatever snapshot the
/// session published and never own an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputField {
    /// Remaining W' as a percentage of capacity
    #[default]
    Percent,
    /// Remaining W' in joules
    Joules,
}

impl OutputField {
    /// Value streamed to the display or recorder
    #[must_use]
    pub fn stream_value(&self, snapshot: &EngineSnapshot) -> f64 {
        match self {
            Self::Percent => snapshot.w_prime_percentage.clamp(0.0, MAX_PERCENTAGE),
            Self::Joules => snapshot.w_prime_joules,
        }
    }

    /// Value shown before the first sample arrives
    #[must_use]
    pub fn initial_stream_value(&self, config: &ConfigurationSnapshot) -> f64 {
        match self {
            Self::Percent => MAX_PERCENTAGE,
            Self::Joules => config.normalized().anaerobic_capacity_joules,
        }
    }

    /// Text rendering of a streamed value
    ///
    /// Percent truncates to whole percent so 99.7 % is not shown as full;
    /// joules round to the nearest joule.
    #[must_use]
    pub fn display_text(&self, value: f64) -> String {
        match self {
            Self::Percent => format!("{}", value.clamp(0.0, MAX_PERCENTAGE).trunc() as i64),
            Self::Joules => format!("{}", value.max(0.0).round() as i64),
        }
    }

    /// Display text for a snapshot
    #[must_use]
    pub fn render(&self, snapshot: &EngineSnapshot) -> String {
        self.display_text(self.stream_value(snapshot))
    }

    /// Unit suffix
    #[must_use]
    pub const fn unit(&self) -> &'static str {
        match self {
            Self::Percent => "%",
            Self::Joules => "J",
        }
    }

    /// Field label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Percent => "%W'",
            Self::Joules => "W' (J)",
        }
    }
}

impl fmt::Display for OutputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percent => write!(f, "percent"),
            Self::Joules => write!(f, "joules"),
        }
    }
}

impl FromStr for OutputField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "percent" | "pct" | "%" => Ok(Self::Percent),
            "joules" | "j" | "kj" => Ok(Self::Joules),
            other => Err(AppError::invalid_input(format!(
                "Unknown output field '{other}', expected 'percent' or 'joules'"
            ))),
        }
    }
}
