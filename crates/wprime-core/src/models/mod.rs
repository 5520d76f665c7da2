// ABOUTME: Core data models for the W' balance engine
// ABOUTME: Re-exports configuration, power reading, and snapshot types
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Data Models
//!
//! - `ConfigurationSnapshot`: athlete parameters plus the selected model
//! - `WPrimeModelType`: closed set of supported W' models
//! - `PowerSample` / `PowerReading`: what the power sensor stream delivers
//! - `EngineSnapshot`: consistent read-only view published to consumers

mod config;
mod reading;
mod snapshot;

pub use config::{ConfigurationSnapshot, WPrimeModelType};
pub use reading::{PowerReading, PowerSample};
pub use snapshot::{BalanceTrend, EngineSnapshot};
