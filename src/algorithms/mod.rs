// ABOUTME: W' model state store with enum-based dispatch over the six balance models
// ABOUTME: Provides the tagged ModelState, the shared integration step, and common update helpers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! W' Model Algorithms
//!
//! Each model keeps its own integration state. The active state lives in one
//! tagged [`ModelState`]; the integration step dispatches once on the tag and
//! hands an [`IntegrationStep`] to the variant's update rule.
//!
//! Every rule honours two laws:
//!
//! - **Steady state**: at exactly critical power the balance does not move.
//! - **Monotone bounds**: above CP the balance never rises and stops at 0;
//!   below CP it never falls and stops at capacity.
//!
//! # Example
//!
//! ```rust
//! use wprime_balance::algorithms::{IntegrationStep, ModelState};
//! use wprime_balance::models::ConfigurationSnapshot;
//!
//! let config = ConfigurationSnapshot::default();
//! let mut state = ModelState::full(&config);
//! state.advance(&IntegrationStep::new(&config, 350.0, 60.0));
//! assert!((state.balance(&config) - 6000.0).abs() < 1e-9);
//! ```

pub mod bartram;
pub mod caen_lievens;
pub mod chorley;
pub mod skiba_2012;
pub mod skiba_differential;
pub mod weigend;

pub use bartram::IndividualTauState;
pub use caen_lievens::{DomainState, IntensityDomain};
pub use chorley::BiExponentialState;
pub use skiba_2012::IntegralState;
pub use skiba_differential::DifferentialState;
pub use weigend::HydraulicState;

use crate::models::{ConfigurationSnapshot, WPrimeModelType};

/// Where the current power sits relative to critical power
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intensity {
    /// Above CP by the given number of watts
    Above(f64),
    /// Exactly at CP
    AtCritical,
    /// Below CP by the given number of watts (`D_CP`)
    Below(f64),
}

/// Inputs of one integration step
///
/// Built from the configuration in effect when the sample arrives, so a
/// CP, tau, or `k_in` edit applies from the next sample onward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegrationStep {
    /// Power held over the step (watts)
    pub watts: f64,
    /// Step length (seconds)
    pub dt_seconds: f64,
    /// Critical power (watts)
    pub critical_power_watts: f64,
    /// Anaerobic capacity (joules)
    pub anaerobic_capacity_joules: f64,
    /// Individual recovery tau (seconds)
    pub tau_recovery_seconds: f64,
    /// Hydraulic inflow coefficient
    pub k_in: f64,
}

impl IntegrationStep {
    /// Step at `watts` for `dt_seconds` under `config`
    #[must_use]
    pub fn new(config: &ConfigurationSnapshot, watts: f64, dt_seconds: f64) -> Self {
        Self {
            watts,
            dt_seconds: dt_seconds.max(0.0),
            critical_power_watts: config.critical_power_watts,
            anaerobic_capacity_joules: config.anaerobic_capacity_joules,
            tau_recovery_seconds: config.tau_recovery_seconds,
            k_in: config.k_in,
        }
    }

    /// Classify the step's power against CP
    #[must_use]
    pub fn intensity(&self) -> Intensity {
        let delta = self.watts - self.critical_power_watts;
        if delta > 0.0 {
            Intensity::Above(delta)
        } else if delta < 0.0 {
            Intensity::Below(-delta)
        } else {
            Intensity::AtCritical
        }
    }
}

/// Exact solution of `dx/dt = (target - x) / tau` over `dt`
///
/// Never overshoots `target` when `x <= target`.
#[must_use]
pub fn relax_toward(current: f64, target: f64, dt_seconds: f64, tau_seconds: f64) -> f64 {
    if tau_seconds <= 0.0 || !tau_seconds.is_finite() {
        return current;
    }
    let decay = (-dt_seconds / tau_seconds).exp();
    let relaxed = (target - current).mul_add(-decay, target);
    if current <= target {
        relaxed.clamp(current, target)
    } else {
        relaxed
    }
}

/// Integration state of the active W' model
///
/// Exactly one variant is live at a time. Switching models replaces the
/// variant with a full one: states of different models are not comparable.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelState {
    /// Skiba 2012 integral state
    Skiba2012(IntegralState),
    /// Skiba differential balance
    SkibaDifferential(DifferentialState),
    /// Bartram individualized-tau balance
    Bartram(IndividualTauState),
    /// Caen/Lievens domain-dependent balance
    CaenLievens(DomainState),
    /// Chorley bi-exponential components
    Chorley(BiExponentialState),
    /// Weigend hydraulic tank levels
    Weigend(HydraulicState),
}

impl ModelState {
    /// Completely full state for the configured model
    #[must_use]
    pub fn full(config: &ConfigurationSnapshot) -> Self {
        let capacity = config.anaerobic_capacity_joules;
        match config.model {
            WPrimeModelType::Skiba2012 => Self::Skiba2012(IntegralState::full()),
            WPrimeModelType::SkibaDifferential => {
                Self::SkibaDifferential(DifferentialState::full(capacity))
            }
            WPrimeModelType::Bartram => Self::Bartram(IndividualTauState::full(capacity)),
            WPrimeModelType::CaenLievens => Self::CaenLievens(DomainState::full(capacity)),
            WPrimeModelType::Chorley => Self::Chorley(BiExponentialState::full(capacity)),
            WPrimeModelType::Weigend => Self::Weigend(HydraulicState::full()),
        }
    }

    /// Model this state belongs to
    #[must_use]
    pub const fn model(&self) -> WPrimeModelType {
        match self {
            Self::Skiba2012(_) => WPrimeModelType::Skiba2012,
            Self::SkibaDifferential(_) => WPrimeModelType::SkibaDifferential,
            Self::Bartram(_) => WPrimeModelType::Bartram,
            Self::CaenLievens(_) => WPrimeModelType::CaenLievens,
            Self::Chorley(_) => WPrimeModelType::Chorley,
            Self::Weigend(_) => WPrimeModelType::Weigend,
        }
    }

    /// Apply one step of the model's update rule
    pub fn advance(&mut self, step: &IntegrationStep) {
        match self {
            Self::Skiba2012(state) => state.advance(step),
            Self::SkibaDifferential(state) => state.advance(step),
            Self::Bartram(state) => state.advance(step),
            Self::CaenLievens(state) => state.advance(step),
            Self::Chorley(state) => state.advance(step),
            Self::Weigend(state) => state.advance(step),
        }
    }

    /// Remaining W' (joules), always within `[0, capacity]`
    #[must_use]
    pub fn balance(&self, config: &ConfigurationSnapshot) -> f64 {
        let capacity = config.anaerobic_capacity_joules;
        let balance = match self {
            Self::Skiba2012(state) => state.balance(capacity),
            Self::SkibaDifferential(state) => state.balance(capacity),
            Self::Bartram(state) => state.balance(capacity),
            Self::CaenLievens(state) => state.balance(capacity),
            Self::Chorley(state) => state.balance(capacity),
            Self::Weigend(state) => state.balance(capacity),
        };
        balance.clamp(0.0, capacity)
    }

    /// Rescale stored work so the remaining fraction survives a capacity edit
    pub fn rescale_capacity(&mut self, old_capacity: f64, new_capacity: f64) {
        let ratio = new_capacity / old_capacity;
        if !ratio.is_finite() || ratio <= 0.0 {
            return;
        }
        match self {
            Self::Skiba2012(state) => state.rescale(ratio),
            Self::SkibaDifferential(state) => state.rescale(ratio),
            Self::Bartram(state) => state.rescale(ratio),
            Self::CaenLievens(state) => state.rescale(ratio),
            Self::Chorley(state) => state.rescale(ratio),
            // Tank levels are stored as fill fractions
            Self::Weigend(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity_classification() {
        let config = ConfigurationSnapshot::default();
        assert_eq!(
            IntegrationStep::new(&config, 300.0, 1.0).intensity(),
            Intensity::Above(50.0)
        );
        assert_eq!(
            IntegrationStep::new(&config, 250.0, 1.0).intensity(),
            Intensity::AtCritical
        );
        assert_eq!(
            IntegrationStep::new(&config, 100.0, 1.0).intensity(),
            Intensity::Below(150.0)
        );
    }

    #[test]
    fn test_relax_toward_never_overshoots() {
        let relaxed = relax_toward(6000.0, 12_000.0, 1.0e6, 30.0);
        assert!(relaxed <= 12_000.0);
        assert!((relaxed - 12_000.0).abs() < 1e-6);

        let half = relax_toward(0.0, 100.0, 2.0_f64.ln(), 1.0);
        assert!((half - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_full_state_matches_model_and_capacity() {
        for model in WPrimeModelType::ALL {
            let config = ConfigurationSnapshot::for_model(model);
            let state = ModelState::full(&config);
            assert_eq!(state.model(), model);
            assert!((state.balance(&config) - config.anaerobic_capacity_joules).abs() < 1e-9);
        }
    }

    #[test]
    fn test_rescale_preserves_fraction() {
        for model in WPrimeModelType::ALL {
            let config = ConfigurationSnapshot::for_model(model);
            let mut state = ModelState::full(&config);
            state.advance(&IntegrationStep::new(&config, 400.0, 30.0));
            let before = state.balance(&config) / config.anaerobic_capacity_joules;

            let bigger = ConfigurationSnapshot {
                anaerobic_capacity_joules: 18_000.0,
                ..config
            };
            state.rescale_capacity(12_000.0, 18_000.0);
            let after = state.balance(&bigger) / bigger.anaerobic_capacity_joules;
            assert!((before - after).abs() < 1e-9, "{model}: {before} vs {after}");
        }
    }
}
