// ABOUTME: Bartram 2018 W' balance model with an individualized recovery time constant
// ABOUTME: Same linear depletion as the differential model, recovery tau supplied by the athlete
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::skiba_differential::deplete_linear;
use super::{relax_toward, Intensity, IntegrationStep};

/// Individualized-tau balance
///
/// Recovery: `W'bal(t + dt) = W' - (W' - W'bal(t)) * exp(-dt / tau)` with the
/// configured `tau_recovery_seconds`. Tau is never derived from the data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndividualTauState {
    /// Remaining W' (joules)
    pub balance_joules: f64,
}

impl IndividualTauState {
    /// Full balance for `capacity`
    #[must_use]
    pub const fn full(capacity: f64) -> Self {
        Self {
            balance_joules: capacity,
        }
    }

    /// Apply one step
    pub fn advance(&mut self, step: &IntegrationStep) {
        let capacity = step.anaerobic_capacity_joules;
        match step.intensity() {
            Intensity::Above(excess) => {
                self.balance_joules = deplete_linear(self.balance_joules, excess, step.dt_seconds);
            }
            Intensity::Below(_) => {
                self.balance_joules = relax_toward(
                    self.balance_joules,
                    capacity,
                    step.dt_seconds,
                    step.tau_recovery_seconds,
                );
            }
            Intensity::AtCritical => {}
        }
        self.balance_joules = self.balance_joules.clamp(0.0, capacity);
    }

    /// Remaining W' (joules)
    #[must_use]
    pub fn balance(&self, capacity: f64) -> f64 {
        self.balance_joules.clamp(0.0, capacity)
    }

    /// Scale the balance with a capacity edit
    pub fn rescale(&mut self, ratio: f64) {
        self.balance_joules *= ratio;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConfigurationSnapshot, WPrimeModelType};

    #[test]
    fn test_recovery_uses_configured_tau_independent_of_power() {
        let config = ConfigurationSnapshot {
            tau_recovery_seconds: 200.0,
            ..ConfigurationSnapshot::for_model(WPrimeModelType::Bartram)
        };
        let mut easy = IndividualTauState {
            balance_joules: 4000.0,
        };
        let mut rest = easy;
        easy.advance(&IntegrationStep::new(&config, 200.0, 200.0));
        rest.advance(&IntegrationStep::new(&config, 0.0, 200.0));

        let expected = 12_000.0 - 8000.0 * (-1.0_f64).exp();
        assert!((easy.balance_joules - expected).abs() < 1e-9);
        assert!((rest.balance_joules - expected).abs() < 1e-9);
    }

    #[test]
    fn test_tau_edit_changes_recovery_speed() {
        let slow = ConfigurationSnapshot {
            tau_recovery_seconds: 600.0,
            ..ConfigurationSnapshot::for_model(WPrimeModelType::Bartram)
        };
        let fast = ConfigurationSnapshot {
            tau_recovery_seconds: 120.0,
            ..slow
        };
        let mut a = IndividualTauState {
            balance_joules: 3000.0,
        };
        let mut b = a;
        a.advance(&IntegrationStep::new(&slow, 100.0, 30.0));
        b.advance(&IntegrationStep::new(&fast, 100.0, 30.0));
        assert!(b.balance_joules > a.balance_joules);
    }
}
