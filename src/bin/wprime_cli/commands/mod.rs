// ABOUTME: Re-exports command modules for wprime-cli
// ABOUTME: Provides the models, replay, and preview commands
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

pub mod models;
pub mod preview;
pub mod replay;
