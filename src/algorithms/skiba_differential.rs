// ABOUTME: Skiba 2014 differential W' balance model
// ABOUTME: Linear depletion above CP, recovery toward W' with tau = W' / D_CP below CP
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::{relax_toward, Intensity, IntegrationStep};

/// Skiba differential balance
///
/// Formula:
/// - above CP: `dW'bal/dt = -(P - CP)`
/// - below CP: `dW'bal/dt = (W' - W'bal) * D_CP / W'`
///
/// The recovery equation is solved exactly over each step, so a long step
/// cannot overshoot W'.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifferentialState {
    /// Remaining W' (joules)
    pub balance_joules: f64,
}

impl DifferentialState {
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
            Intensity::Below(d_cp) => {
                let tau = capacity / d_cp;
                self.balance_joules =
                    relax_toward(self.balance_joules, capacity, step.dt_seconds, tau);
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

/// Spend `(P - CP) * dt` joules, floored at zero
#[must_use]
pub fn deplete_linear(balance: f64, excess_watts: f64, dt_seconds: f64) -> f64 {
    (-excess_watts).mul_add(dt_seconds, balance).max(0.0)
}
