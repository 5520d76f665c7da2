// ABOUTME: Main library entry point for the real-time W' balance engine
// ABOUTME: Tracks remaining anaerobic work capacity from a live power stream under six W' balance models
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![deny(unsafe_code)]

//! # W' Balance
//!
//! Real-time tracking of W', the finite work capacity an athlete can spend
//! above critical power (CP). Power samples arrive every one to three
//! seconds; each one advances the selected model and publishes a new
//! snapshot of the remaining joules and percentage.
//!
//! ## Architecture
//!
//! - **Models** (`wprime-core`): configuration snapshot, model type, power
//!   readings, engine snapshot
//! - **Algorithms**: one update rule per W' model behind a tagged state
//! - **Engine**: state store, sample clock and configuration port
//! - **Session**: async task joining the power and configuration streams
//!   onto one writer, with watch-based readers
//! - **Output**: percentage and joules display fields
//!
//! ## Example Usage
//!
//! ```rust
//! use wprime_balance::engine::{WPrimeEngine, WPrimeOutput};
//! use wprime_balance::models::ConfigurationSnapshot;
//!
//! let mut engine = WPrimeEngine::new(ConfigurationSnapshot::default());
//! let mut joules = engine.ingest_sample(350.0, 0);
//! for second in 1..=60 {
//!     joules = engine.ingest_sample(350.0, second * 1000);
//! }
//! assert!((joules - 6000.0).abs() < 1e-9);
//! assert!((engine.w_prime_percentage() - 50.0).abs() < 1e-9);
//! ```

/// Per-model W' update rules and the tagged model state
pub mod algorithms;

/// Environment-based engine settings
pub mod config;

/// Integration engine, sample clock, and output port
pub mod engine;

/// Structured logging setup
pub mod logging;

/// Percentage and joules display fields
pub mod output;

/// Synthetic power for previews
pub mod preview;

/// JSON-lines recording reader
pub mod replay;

/// Async session serializing power and configuration updates
pub mod session;

// Re-export the core crate so callers need a single dependency
pub use wprime_core::{constants, errors, models};

pub use engine::{EngineOptions, WPrimeEngine, WPrimeOutput};
pub use session::{SnapshotReader, WPrimeSession};
