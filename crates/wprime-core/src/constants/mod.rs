// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Engine defaults, safety floors, and published W' model coefficients
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Constants module
//!
//! Constants are grouped by domain: configuration defaults, numeric floors
//! that keep every formula well defined, sample clock policy, and the
//! coefficients of each W' model.

/// Coefficients for the six W' balance models (published or engineering defaults)
pub mod models;

/// Default athlete configuration, used until a settings store delivers one
pub mod defaults {
    /// Default critical power (watts)
    pub const CRITICAL_POWER_WATTS: f64 = 250.0;
    /// Default anaerobic work capacity W' (joules)
    pub const ANAEROBIC_CAPACITY_JOULES: f64 = 12_000.0;
    /// Default individualized recovery time constant (seconds)
    pub const TAU_RECOVERY_SECONDS: f64 = 300.0;
    /// Default hydraulic inflow rate coefficient (per second)
    pub const K_IN: f64 = 0.002;
}

/// Lower bounds applied to configuration values before storage
///
/// Values below these floors are clamped, never rejected: a settings field
/// being edited must never bring the engine down.
pub mod floors {
    /// Minimum critical power (watts)
    pub const MIN_CRITICAL_POWER_WATTS: f64 = 1.0;
    /// Minimum anaerobic capacity (joules)
    pub const MIN_ANAEROBIC_CAPACITY_JOULES: f64 = 1.0;
    /// Minimum recovery time constant (seconds)
    pub const MIN_TAU_RECOVERY_SECONDS: f64 = 1.0;
    /// Minimum hydraulic inflow coefficient (per second)
    pub const MIN_K_IN: f64 = 1e-6;
}

/// Sample clock policy
pub mod timing {
    /// Gaps longer than this are treated as zero elapsed time (milliseconds)
    ///
    /// Power sensors report every 1-3 s; a gap of this size means the sensor
    /// dropped out or the device slept.
    pub const DEFAULT_MAX_SAMPLE_GAP_MILLIS: i64 = 30_000;
    /// Milliseconds per second
    pub const MILLIS_PER_SECOND: f64 = 1000.0;
}

/// Output port thresholds
pub mod output {
    /// Fraction of capacity at or above which W' is reported as full
    pub const FULL_FRACTION: f64 = 0.995;
    /// Upper bound of the percentage output
    pub const MAX_PERCENTAGE: f64 = 100.0;
}

/// Synthetic preview power profile
pub mod preview {
    /// Length of one preview power cycle (seconds)
    pub const CYCLE_SECONDS: f64 = 30.0;
    /// Lowest preview power as a fraction of CP
    pub const MIN_POWER_FRACTION: f64 = 0.0;
    /// Highest preview power as a fraction of CP
    pub const MAX_POWER_FRACTION: f64 = 1.6;
    /// Uniform noise amplitude as a fraction of CP
    pub const NOISE_FRACTION: f64 = 0.05;
}

/// Environment variable names read by the settings loader
pub mod env_keys {
    /// Critical power (watts)
    pub const CRITICAL_POWER: &str = "WPRIME_CRITICAL_POWER";
    /// Anaerobic capacity (joules)
    pub const ANAEROBIC_CAPACITY: &str = "WPRIME_ANAEROBIC_CAPACITY";
    /// Recovery tau (seconds)
    pub const TAU_RECOVERY: &str = "WPRIME_TAU_RECOVERY";
    /// Hydraulic inflow coefficient
    pub const K_IN: &str = "WPRIME_K_IN";
    /// Model name
    pub const MODEL: &str = "WPRIME_MODEL";
    /// Gap ceiling (milliseconds)
    pub const MAX_SAMPLE_GAP_MS: &str = "WPRIME_MAX_SAMPLE_GAP_MS";
}

/// Service identity used in structured logs
pub mod service_names {
    /// Name reported by the logging layer
    pub const WPRIME_BALANCE: &str = "wprime-balance";
}
