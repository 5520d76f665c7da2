// ABOUTME: Environment-based engine settings for the W' balance engine
// ABOUTME: Reads athlete parameters, model choice, and the dropout ceiling from WPRIME_* variables
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Environment-based configuration

use crate::constants::{env_keys, timing::DEFAULT_MAX_SAMPLE_GAP_MILLIS};
use crate::engine::EngineOptions;
use crate::errors::ConfigError;
use crate::models::{ConfigurationSnapshot, WPrimeModelType};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use tracing::info;

/// Initial engine settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Athlete configuration the engine starts with
    pub configuration: ConfigurationSnapshot,
    /// Sample gap ceiling (milliseconds), zero disables it
    pub max_sample_gap_millis: i64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            configuration: ConfigurationSnapshot::default(),
            max_sample_gap_millis: DEFAULT_MAX_SAMPLE_GAP_MILLIS,
        }
    }
}

/// Per-field overrides layered on top of loaded settings (command line flags)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SettingsOverrides {
    /// Model override
    pub model: Option<WPrimeModelType>,
    /// Critical power override (watts)
    pub critical_power_watts: Option<f64>,
    /// Anaerobic capacity override (joules)
    pub anaerobic_capacity_joules: Option<f64>,
    /// Recovery tau override (seconds)
    pub tau_recovery_seconds: Option<f64>,
    /// Hydraulic inflow coefficient override
    pub k_in: Option<f64>,
    /// Gap ceiling override (milliseconds)
    pub max_sample_gap_millis: Option<i64>,
}

impl EngineSettings {
    /// Load settings from `WPRIME_*` environment variables
    ///
    /// Unset or blank variables keep their defaults. Numeric values are
    /// clamped to their floors by [`ConfigurationSnapshot::normalized`].
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is not valid unicode, does not parse as
    /// a number, or names an unknown model
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let model = match env_value::<String>(env_keys::MODEL)? {
            Some(name) => name.parse::<WPrimeModelType>()?,
            None => defaults.configuration.model,
        };

        let configuration = ConfigurationSnapshot {
            critical_power_watts: env_value(env_keys::CRITICAL_POWER)?
                .unwrap_or(defaults.configuration.critical_power_watts),
            anaerobic_capacity_joules: env_value(env_keys::ANAEROBIC_CAPACITY)?
                .unwrap_or(defaults.configuration.anaerobic_capacity_joules),
            tau_recovery_seconds: env_value(env_keys::TAU_RECOVERY)?
                .unwrap_or(defaults.configuration.tau_recovery_seconds),
            k_in: env_value(env_keys::K_IN)?.unwrap_or(defaults.configuration.k_in),
            model,
        }
        .normalized();

        let settings = Self {
            configuration,
            max_sample_gap_millis: env_value(env_keys::MAX_SAMPLE_GAP_MS)?
                .unwrap_or(defaults.max_sample_gap_millis),
        };
        info!("Engine settings loaded: {}", settings.summary());
        Ok(settings)
    }

    /// Apply command line overrides, re-clamping the result
    #[must_use]
    pub fn with_overrides(self, overrides: &SettingsOverrides) -> Self {
        let base = self.configuration;
        let configuration = ConfigurationSnapshot {
            critical_power_watts: overrides
                .critical_power_watts
                .unwrap_or(base.critical_power_watts),
            anaerobic_capacity_joules: overrides
                .anaerobic_capacity_joules
                .unwrap_or(base.anaerobic_capacity_joules),
            tau_recovery_seconds: overrides
                .tau_recovery_seconds
                .unwrap_or(base.tau_recovery_seconds),
            k_in: overrides.k_in.unwrap_or(base.k_in),
            model: overrides.model.unwrap_or(base.model),
        }
        .normalized();

        Self {
            configuration,
            max_sample_gap_millis: overrides
                .max_sample_gap_millis
                .unwrap_or(self.max_sample_gap_millis),
        }
    }

    /// Engine options derived from these settings
    #[must_use]
    pub const fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            max_sample_gap_millis: self.max_sample_gap_millis,
        }
    }

    /// One-line description for logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{}, gap ceiling: {}ms",
            self.configuration.summary(),
            self.max_sample_gap_millis
        )
    }
}

/// Read and parse an optional environment variable
fn env_value<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = match env::var(key) {
        Ok(raw) => raw,
        Err(env::VarError::NotPresent) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<T>()
        .map(Some)
        .map_err(|e| ConfigError::Parse(format!("{key}='{trimmed}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ALL_KEYS: [&str; 6] = [
        env_keys::CRITICAL_POWER,
        env_keys::ANAEROBIC_CAPACITY,
        env_keys::TAU_RECOVERY,
        env_keys::K_IN,
        env_keys::MODEL,
        env_keys::MAX_SAMPLE_GAP_MS,
    ];

    fn clear_env() {
        for key in ALL_KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_when_unset() {
        clear_env();
        let settings = EngineSettings::from_env().unwrap();
        assert_eq!(settings, EngineSettings::default());
    }

    #[test]
    #[serial]
    fn test_reads_and_clamps_values() {
        clear_env();
        env::set_var(env_keys::CRITICAL_POWER, "310");
        env::set_var(env_keys::ANAEROBIC_CAPACITY, "-5");
        env::set_var(env_keys::MODEL, "bartram");
        env::set_var(env_keys::TAU_RECOVERY, " 240 ");
        env::set_var(env_keys::MAX_SAMPLE_GAP_MS, "60000");

        let settings = EngineSettings::from_env().unwrap();
        clear_env();

        assert!((settings.configuration.critical_power_watts - 310.0).abs() < f64::EPSILON);
        assert!((settings.configuration.anaerobic_capacity_joules - 1.0).abs() < f64::EPSILON);
        assert!((settings.configuration.tau_recovery_seconds - 240.0).abs() < f64::EPSILON);
        assert_eq!(settings.configuration.model, WPrimeModelType::Bartram);
        assert_eq!(settings.engine_options().max_sample_gap_millis, 60_000);
    }

    #[test]
    #[serial]
    fn test_rejects_unparseable_number_and_unknown_model() {
        clear_env();
        env::set_var(env_keys::CRITICAL_POWER, "fast");
        assert!(matches!(
            EngineSettings::from_env(),
            Err(ConfigError::Parse(_))
        ));

        clear_env();
        env::set_var(env_keys::MODEL, "monod");
        assert!(matches!(
            EngineSettings::from_env(),
            Err(ConfigError::UnknownModel(_))
        ));
        clear_env();
    }

    #[test]
    fn test_overrides_replace_only_given_fields() {
        let settings = EngineSettings::default().with_overrides(&SettingsOverrides {
            model: Some(WPrimeModelType::Weigend),
            k_in: Some(0.0),
            ..SettingsOverrides::default()
        });
        assert_eq!(settings.configuration.model, WPrimeModelType::Weigend);
        assert!(settings.configuration.k_in > 0.0);
        assert!((settings.configuration.critical_power_watts - 250.0).abs() < f64::EPSILON);
        assert_eq!(settings.max_sample_gap_millis, DEFAULT_MAX_SAMPLE_GAP_MILLIS);
    }
}
