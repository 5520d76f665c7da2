// ABOUTME: Helper modules for wprime-cli
// ABOUTME: Provides snapshot display functions
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

pub mod display;
