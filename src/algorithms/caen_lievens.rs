// ABOUTME: Caen/Lievens domain-dependent W' balance model
// ABOUTME: Classifies power into intensity domains and recovers with a domain-specific tau
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::skiba_differential::deplete_linear;
use super::{relax_toward, Intensity, IntegrationStep};
use crate::constants::models::caen_lievens::{
    HEAVY_DOMAIN_MIN_FRACTION, HEAVY_TAU_SECONDS, LIGHT_TAU_SECONDS,
    MODERATE_DOMAIN_MIN_FRACTION, MODERATE_TAU_SECONDS,
};
use serde::{Deserialize, Serialize};

/// Exercise intensity domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IntensityDomain {
    /// Above CP, W' is being spent
    Severe,
    /// Just below CP (and exactly at CP)
    Heavy,
    /// Clearly below CP
    Moderate,
    /// Easy riding or rest
    #[default]
    Light,
}

impl IntensityDomain {
    /// Classify `watts` against `critical_power_watts`
    #[must_use]
    pub fn classify(watts: f64, critical_power_watts: f64) -> Self {
        if watts > critical_power_watts {
            return Self::Severe;
        }
        let fraction = watts / critical_power_watts;
        if fraction >= HEAVY_DOMAIN_MIN_FRACTION {
            Self::Heavy
        } else if fraction >= MODERATE_DOMAIN_MIN_FRACTION {
            Self::Moderate
        } else {
            Self::Light
        }
    }

    /// Recovery time constant in this domain, `None` while depleting
    #[must_use]
    pub const fn recovery_tau(&self) -> Option<f64> {
        match self {
            Self::Severe => None,
            Self::Heavy => Some(HEAVY_TAU_SECONDS),
            Self::Moderate => Some(MODERATE_TAU_SECONDS),
            Self::Light => Some(LIGHT_TAU_SECONDS),
        }
    }
}

/// Domain-dependent balance
///
/// Depletion is linear like the differential model. Recovery relaxes toward
/// W' with a tau picked from the domain of the current sample: the further
/// below CP, the faster W' comes back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainState {
    /// Remaining W' (joules)
    pub balance_joules: f64,
    /// Domain of the most recent step
    pub domain: IntensityDomain,
}

impl DomainState {
    /// Full balance for `capacity`
    #[must_use]
    pub const fn full(capacity: f64) -> Self {
        Self {
            balance_joules: capacity,
            domain: IntensityDomain::Light,
        }
    }

    /// Apply one step
    pub fn advance(&mut self, step: &IntegrationStep) {
        let capacity = step.anaerobic_capacity_joules;
        self.domain = IntensityDomain::classify(step.watts, step.critical_power_watts);
        match step.intensity() {
            Intensity::Above(excess) => {
                self.balance_joules = deplete_linear(self.balance_joules, excess, step.dt_seconds);
            }
            Intensity::Below(_) => {
                if let Some(tau) = self.domain.recovery_tau() {
                    self.balance_joules =
                        relax_toward(self.balance_joules, capacity, step.dt_seconds, tau);
                }
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
