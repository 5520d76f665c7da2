// ABOUTME: Read-only output port exposing the latest W' snapshot to display and recording consumers
// ABOUTME: Every accessor reads one published snapshot so values are never half-updated
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::models::EngineSnapshot;

/// Pure reads of the most recently published [`EngineSnapshot`]
///
/// Implementors only supply [`WPrimeOutput::snapshot`]. Callers that need
/// several values at once should take one snapshot and read its fields, since
/// two accessor calls may straddle an update.
pub trait WPrimeOutput {
    /// Latest published snapshot
    fn snapshot(&self) -> EngineSnapshot;

    /// Remaining W' (joules)
    fn w_prime_joules(&self) -> f64 {
        self.snapshot().w_prime_joules
    }

    /// Remaining W' as a percentage of capacity, in `[0, 100]`
    fn w_prime_percentage(&self) -> f64 {
        self.snapshot().w_prime_percentage
    }

    /// Critical power in effect (watts)
    fn critical_power_watts(&self) -> f64 {
        self.snapshot().critical_power_watts
    }

    /// Anaerobic capacity in effect (joules)
    fn anaerobic_capacity_joules(&self) -> f64 {
        self.snapshot().anaerobic_capacity_joules
    }
}
