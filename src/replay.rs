// ABOUTME: JSON-lines power recording reader for replaying rides through the W' engine
// ABOUTME: Accepts plain samples or searching/not_available sentinels, one JSON object per line
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Replay input format
//!
//! One JSON object per line:
//!
//! ```text
//! {"watts": 310.0, "timestamp_millis": 1000}
//! {"state": "searching"}
//! {"state": "streaming", "watts": 295.0, "timestamp_millis": 2000}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use crate::errors::{AppError, AppResult};
use crate::models::{PowerReading, PowerSample};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum ReplayLine {
    Tagged(PowerReading),
    Sample(PowerSample),
}

/// Parse one line of a recording
///
/// # Errors
///
/// Returns an error if the line is neither a sample nor a sentinel
pub fn parse_replay_line(line: &str) -> AppResult<Option<PowerReading>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let parsed: ReplayLine = serde_json::from_str(trimmed).map_err(|e| {
        AppError::invalid_format(format!("Invalid power reading '{trimmed}': {e}"))
    })?;
    Ok(Some(match parsed {
        ReplayLine::Tagged(reading) => match reading {
            PowerReading::Streaming(sample) => {
                PowerReading::streaming(sample.watts, sample.timestamp_millis)
            }
            sentinel => sentinel,
        },
        ReplayLine::Sample(sample) => PowerReading::streaming(sample.watts, sample.timestamp_millis),
    }))
}

/// Parse a whole recording held in memory
///
/// # Errors
///
/// Returns an error naming the first line that fails to parse
pub fn parse_replay(contents: &str) -> AppResult<Vec<PowerReading>> {
    let mut readings = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        let reading = parse_replay_line(line).map_err(|e| {
            AppError::invalid_format(format!("line {}: {}", index + 1, e.message))
        })?;
        readings.extend(reading);
    }
    Ok(readings)
}

/// Read a recording from disk
///
/// # Errors
///
/// Returns an error if the file cannot be read or a line fails to parse
pub fn read_replay(path: impl AsRef<Path>) -> AppResult<Vec<PowerReading>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| {
        AppError::invalid_input(format!("Cannot read replay file {}: {e}", path.display()))
            .with_source(e)
    })?;
    parse_replay(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_sample_line() {
        let reading = parse_replay_line(r#"{"watts": 310.5, "timestamp_millis": 1000}"#)
            .unwrap()
            .unwrap();
        assert_eq!(reading, PowerReading::streaming(310.5, 1000));
    }

    #[test]
    fn test_sentinel_lines() {
        assert_eq!(
            parse_replay_line(r#"{"state":"searching"}"#).unwrap(),
            Some(PowerReading::Searching)
        );
        assert_eq!(
            parse_replay_line(r#"{"state":"not_available"}"#).unwrap(),
            Some(PowerReading::NotAvailable)
        );
    }

    #[test]
    fn test_negative_watts_are_floored_on_read() {
        let reading = parse_replay_line(r#"{"watts": -20, "timestamp_millis": 5}"#)
            .unwrap()
            .unwrap();
        assert_eq!(reading.sample().map(|s| s.watts), Some(0.0));
    }

    #[test]
    fn test_skips_blank_and_comment_lines() {
        let readings = parse_replay("\n# warmup\n{\"watts\":100,\"timestamp_millis\":0}\n\n").unwrap();
        assert_eq!(readings.len(), 1);
    }

    #[test]
    fn test_error_names_line_number() {
        let err = parse_replay("{\"watts\":100,\"timestamp_millis\":0}\nnot json").unwrap_err();
        assert!(err.message.starts_with("line 2:"));
    }
}
