// ABOUTME: Core types and constants for the W' balance engine
// ABOUTME: Foundation crate with error handling, physiological constants, and data models
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![deny(unsafe_code)]

//! # W' Balance Core
//!
//! Foundation crate providing shared types and constants for the W' balance
//! engine. This crate is designed to change infrequently, enabling incremental
//! compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `ConfigError`
//! - **constants**: Physiological model coefficients and engine defaults
//! - **models**: Configuration snapshots, power readings, and engine snapshots

/// Unified error handling system with standard error codes
pub mod errors;

/// Model coefficients and configuration defaults organized by domain
pub mod constants;

/// Core data models (configuration, power samples, engine snapshots)
pub mod models;
