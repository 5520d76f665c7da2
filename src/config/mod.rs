// ABOUTME: Configuration module for the W' balance engine
// ABOUTME: Loads initial engine settings from the environment and applies command line overrides
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Configuration module
//!
//! The engine itself never reads the environment. Its initial
//! [`ConfigurationSnapshot`](crate::models::ConfigurationSnapshot) and options
//! come from [`EngineSettings`]; later edits arrive as complete snapshots on
//! the session's configuration stream.

/// Environment variable loading
pub mod environment;

pub use environment::{EngineSettings, SettingsOverrides};
