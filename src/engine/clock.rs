// ABOUTME: Sample clock turning successive power timestamps into integration intervals
// ABOUTME: Handles the bootstrap sample, out-of-order timestamps, and sensor dropouts
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::constants::timing::{DEFAULT_MAX_SAMPLE_GAP_MILLIS, MILLIS_PER_SECOND};

/// How a new timestamp relates to the previous one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockStep {
    /// First sample of the session: nothing to integrate yet
    Bootstrap,
    /// Normal interval since the previous sample
    Elapsed {
        /// Interval length (milliseconds)
        millis: i64,
    },
    /// Timestamp older than (or equal to) the previous one
    OutOfOrder,
    /// Interval longer than the dropout ceiling; treated as no elapsed time
    GapExceeded {
        /// Measured gap (milliseconds)
        gap_millis: i64,
    },
}

impl ClockStep {
    /// Integration interval in seconds
    #[must_use]
    pub fn seconds(&self) -> f64 {
        match self {
            Self::Elapsed { millis } => *millis as f64 / MILLIS_PER_SECOND,
            Self::Bootstrap | Self::OutOfOrder | Self::GapExceeded { .. } => 0.0,
        }
    }
}

/// Tracks the timestamp of the last accepted sample
///
/// The clock only moves forward. An out-of-order timestamp yields zero
/// elapsed time and leaves the clock where it was; a dropout longer than
/// `max_gap_millis` yields zero elapsed time but the clock jumps to the new
/// timestamp so integration resumes from there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleClock {
    last_timestamp_millis: Option<i64>,
    max_gap_millis: i64,
}

impl Default for SampleClock {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SAMPLE_GAP_MILLIS)
    }
}

impl SampleClock {
    /// Clock with the given dropout ceiling; non-positive means no ceiling
    #[must_use]
    pub const fn new(max_gap_millis: i64) -> Self {
        Self {
            last_timestamp_millis: None,
            max_gap_millis,
        }
    }

    /// Register a timestamp and classify the interval since the last one
    pub fn advance(&mut self, timestamp_millis: i64) -> ClockStep {
        let Some(previous) = self.last_timestamp_millis else {
            self.last_timestamp_millis = Some(timestamp_millis);
            return ClockStep::Bootstrap;
        };

        let gap = timestamp_millis.saturating_sub(previous);
        if gap <= 0 {
            return ClockStep::OutOfOrder;
        }

        self.last_timestamp_millis = Some(timestamp_millis);
        if self.max_gap_millis > 0 && gap > self.max_gap_millis {
            ClockStep::GapExceeded { gap_millis: gap }
        } else {
            ClockStep::Elapsed { millis: gap }
        }
    }

    /// Timestamp of the last accepted sample
    #[must_use]
    pub const fn last_timestamp_millis(&self) -> Option<i64> {
        self.last_timestamp_millis
    }

    /// Configured dropout ceiling (milliseconds)
    #[must_use]
    pub const fn max_gap_millis(&self) -> i64 {
        self.max_gap_millis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_bootstraps() {
        let mut clock = SampleClock::default();
        assert_eq!(clock.advance(5_000), ClockStep::Bootstrap);
        assert_eq!(clock.last_timestamp_millis(), Some(5_000));
        assert_eq!(clock.advance(6_000), ClockStep::Elapsed { millis: 1_000 });
    }

    #[test]
    fn test_out_of_order_does_not_move_clock_back() {
        let mut clock = SampleClock::default();
        clock.advance(10_000);
        assert_eq!(clock.advance(9_000), ClockStep::OutOfOrder);
        assert_eq!(clock.advance(10_000), ClockStep::OutOfOrder);
        assert_eq!(clock.last_timestamp_millis(), Some(10_000));
        assert_eq!(clock.advance(11_000), ClockStep::Elapsed { millis: 1_000 });
    }

    #[test]
    fn test_dropout_jumps_clock_without_elapsed_time() {
        let mut clock = SampleClock::new(30_000);
        clock.advance(0);
        let step = clock.advance(120_000);
        assert_eq!(step, ClockStep::GapExceeded { gap_millis: 120_000 });
        assert!(step.seconds().abs() < f64::EPSILON);
        assert_eq!(clock.advance(121_000), ClockStep::Elapsed { millis: 1_000 });
    }

    #[test]
    fn test_zero_ceiling_disables_dropout_detection() {
        let mut clock = SampleClock::new(0);
        clock.advance(0);
        let step = clock.advance(600_000);
        assert_eq!(step, ClockStep::Elapsed { millis: 600_000 });
        assert!((step.seconds() - 600.0).abs() < f64::EPSILON);
    }
}
