// ABOUTME: Chorley 2023 bi-exponential W' balance model
// ABOUTME: Splits W' into fast and slow components that recover with independent time constants
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::{relax_toward, Intensity, IntegrationStep};
use crate::constants::models::chorley::{
    FAST_COMPONENT_FRACTION, FAST_TAU_SECONDS, SLOW_TAU_SECONDS,
};

/// Bi-exponential component balances
///
/// Each component owns a fixed share of W'. Work above CP is taken from both
/// in proportion to what each currently holds; below CP each relaxes toward
/// its own share with its own tau. The balance is the sum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiExponentialState {
    /// Fast component (joules)
    pub fast_balance_joules: f64,
    /// Slow component (joules)
    pub slow_balance_joules: f64,
}

impl BiExponentialState {
    /// Both components full for `capacity`
    #[must_use]
    pub fn full(capacity: f64) -> Self {
        let (fast, slow) = Self::component_capacities(capacity);
        Self {
            fast_balance_joules: fast,
            slow_balance_joules: slow,
        }
    }

    /// Capacity of the fast and slow components
    #[must_use]
    pub fn component_capacities(capacity: f64) -> (f64, f64) {
        let fast = capacity * FAST_COMPONENT_FRACTION;
        (fast, capacity - fast)
    }

    /// Apply one step
    pub fn advance(&mut self, step: &IntegrationStep) {
        let (fast_capacity, slow_capacity) =
            Self::component_capacities(step.anaerobic_capacity_joules);
        match step.intensity() {
            Intensity::Above(excess) => {
                let loss = excess * step.dt_seconds;
                let total = self.fast_balance_joules + self.slow_balance_joules;
                if loss >= total {
                    self.fast_balance_joules = 0.0;
                    self.slow_balance_joules = 0.0;
                } else {
                    let remaining = (total - loss) / total;
                    self.fast_balance_joules *= remaining;
                    self.slow_balance_joules *= remaining;
                }
            }
            Intensity::Below(_) => {
                self.fast_balance_joules = relax_toward(
                    self.fast_balance_joules,
                    fast_capacity,
                    step.dt_seconds,
                    FAST_TAU_SECONDS,
                );
                self.slow_balance_joules = relax_toward(
                    self.slow_balance_joules,
                    slow_capacity,
                    step.dt_seconds,
                    SLOW_TAU_SECONDS,
                );
            }
            Intensity::AtCritical => {}
        }
        self.fast_balance_joules = self.fast_balance_joules.clamp(0.0, fast_capacity);
        self.slow_balance_joules = self.slow_balance_joules.clamp(0.0, slow_capacity);
    }

    /// Remaining W' (joules)
    #[must_use]
    pub fn balance(&self, capacity: f64) -> f64 {
        (self.fast_balance_joules + self.slow_balance_joules).clamp(0.0, capacity)
    }

    /// Scale both components with a capacity edit
    pub fn rescale(&mut self, ratio: f64) {
        self.fast_balance_joules *= ratio;
        self.slow_balance_joules *= ratio;
    }
}
