// ABOUTME: Configuration snapshot and the closed set of W' model types
// ABOUTME: Handles model metadata, name parsing, and clamping of athlete parameters
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::constants::{defaults, floors};
use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// W' balance model selection
///
/// - `Skiba2012`: integral model, recovery tau derived from distance below CP
/// - `SkibaDifferential`: differential model, tau = W' / (CP - P)
/// - `Bartram`: differential form with the athlete's individual tau
/// - `CaenLievens`: recovery tau chosen by intensity domain
/// - `Chorley`: bi-exponential recovery with fast and slow components
/// - `Weigend`: three-compartment hydraulic model
///
/// # Scientific References
///
/// - Skiba, P.F. et al. (2012). *Med Sci Sports Exerc*, 44(8), 1526-1532.
/// - Skiba, P.F. et al. (2014). Intramuscular determinants of the ability to recover work capacity above critical power. *Eur J Appl Physiol*, 115, 703-713.
/// - Bartram, J.C. et al. (2018). Accuracy of W' recovery kinetics in high performance cyclists. *Int J Sports Physiol Perform*, 13(6), 724-728.
/// - Chorley, A. et al. (2023). *Eur J Appl Physiol*, 123, 677-690.
/// - Weigend, F.C. et al. (2022). *Ann Oper Res*, 325, 589-613.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WPrimeModelType {
    /// Skiba 2012 integral model
    Skiba2012,
    /// Skiba 2014 differential model
    #[default]
    SkibaDifferential,
    /// Bartram 2018 individualized tau
    Bartram,
    /// Caen/Lievens domain-dependent recovery
    CaenLievens,
    /// Chorley 2023 bi-exponential recovery
    Chorley,
    /// Weigend 2022 hydraulic model
    Weigend,
}

impl WPrimeModelType {
    /// Every supported model, in menu order
    pub const ALL: [Self; 6] = [
        Self::Skiba2012,
        Self::SkibaDifferential,
        Self::Bartram,
        Self::CaenLievens,
        Self::Chorley,
        Self::Weigend,
    ];

    /// Canonical machine name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Skiba2012 => "skiba_2012",
            Self::SkibaDifferential => "skiba_differential",
            Self::Bartram => "bartram",
            Self::CaenLievens => "caen_lievens",
            Self::Chorley => "chorley",
            Self::Weigend => "weigend",
        }
    }

    /// Human-readable name for settings menus
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Skiba2012 => "Skiba 2012",
            Self::SkibaDifferential => "Skiba Differential (2014)",
            Self::Bartram => "Bartram 2018",
            Self::CaenLievens => "Caen/Lievens (Domain)",
            Self::Chorley => "Chorley 2023 (Bi-Exp)",
            Self::Weigend => "Weigend 2022 (Hydraulic)",
        }
    }

    /// Whether the model reads `tau_recovery_seconds`
    #[must_use]
    pub const fn uses_tau(&self) -> bool {
        matches!(self, Self::Bartram)
    }

    /// Whether the model reads `k_in`
    #[must_use]
    pub const fn uses_k_in(&self) -> bool {
        matches!(self, Self::Weigend)
    }
}

impl fmt::Display for WPrimeModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WPrimeModelType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "skiba_2012" | "skiba2012" | "integral" => Ok(Self::Skiba2012),
            "skiba_differential" | "differential" | "skiba" => Ok(Self::SkibaDifferential),
            "bartram" => Ok(Self::Bartram),
            "caen_lievens" | "domain" => Ok(Self::CaenLievens),
            "chorley" | "bi_exponential" | "biexp" => Ok(Self::Chorley),
            "weigend" | "hydraulic" => Ok(Self::Weigend),
            _ => Err(ConfigError::UnknownModel(s.to_owned())),
        }
    }
}

/// Complete athlete configuration delivered by a settings store
///
/// Every delivery is a full replacement, never a diff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationSnapshot {
    /// Critical power (watts)
    pub critical_power_watts: f64,
    /// Anaerobic work capacity W' (joules)
    pub anaerobic_capacity_joules: f64,
    /// Individual recovery time constant (seconds), Bartram only
    pub tau_recovery_seconds: f64,
    /// Hydraulic inflow rate coefficient, Weigend only
    pub k_in: f64,
    /// Active model
    pub model: WPrimeModelType,
}

impl Default for ConfigurationSnapshot {
    fn default() -> Self {
        Self {
            critical_power_watts: defaults::CRITICAL_POWER_WATTS,
            anaerobic_capacity_joules: defaults::ANAEROBIC_CAPACITY_JOULES,
            tau_recovery_seconds: defaults::TAU_RECOVERY_SECONDS,
            k_in: defaults::K_IN,
            model: WPrimeModelType::default(),
        }
    }
}

impl ConfigurationSnapshot {
    /// Default parameters under the given model
    #[must_use]
    pub fn for_model(model: WPrimeModelType) -> Self {
        Self {
            model,
            ..Self::default()
        }
    }

    /// Copy with every parameter clamped to its positive floor
    ///
    /// Non-finite values (NaN, infinities from a half-typed field) fall back
    /// to the floor as well.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            critical_power_watts: clamp_to_floor(
                self.critical_power_watts,
                floors::MIN_CRITICAL_POWER_WATTS,
            ),
            anaerobic_capacity_joules: clamp_to_floor(
                self.anaerobic_capacity_joules,
                floors::MIN_ANAEROBIC_CAPACITY_JOULES,
            ),
            tau_recovery_seconds: clamp_to_floor(
                self.tau_recovery_seconds,
                floors::MIN_TAU_RECOVERY_SECONDS,
            ),
            k_in: clamp_to_floor(self.k_in, floors::MIN_K_IN),
            model: self.model,
        }
    }

    /// One-line description for logs
    #[must_use]
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Model: {}, CP: {:.0}W, W': {:.0}J",
            self.model.display_name(),
            self.critical_power_watts,
            self.anaerobic_capacity_joules
        );
        if self.model.uses_tau() {
            summary.push_str(&format!(", Tau: {:.0}s", self.tau_recovery_seconds));
        }
        if self.model.uses_k_in() {
            summary.push_str(&format!(", kIn: {}", self.k_in));
        }
        summary
    }
}

fn clamp_to_floor(value: f64, floor: f64) -> f64 {
    if value.is_finite() {
        value.max(floor)
    } else {
        floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_parsing_accepts_canonical_names_and_aliases() {
        for model in WPrimeModelType::ALL {
            assert_eq!(model.name().parse::<WPrimeModelType>().unwrap(), model);
        }
        assert_eq!(
            "Hydraulic".parse::<WPrimeModelType>().unwrap(),
            WPrimeModelType::Weigend
        );
        assert_eq!(
            "skiba-2012".parse::<WPrimeModelType>().unwrap(),
            WPrimeModelType::Skiba2012
        );
        assert!(matches!(
            "banister".parse::<WPrimeModelType>(),
            Err(ConfigError::UnknownModel(name)) if name == "banister"
        ));
    }

    #[test]
    fn test_parameter_requirements() {
        let tau_users: Vec<_> = WPrimeModelType::ALL
            .into_iter()
            .filter(WPrimeModelType::uses_tau)
            .collect();
        let k_in_users: Vec<_> = WPrimeModelType::ALL
            .into_iter()
            .filter(WPrimeModelType::uses_k_in)
            .collect();
        assert_eq!(tau_users, vec![WPrimeModelType::Bartram]);
        assert_eq!(k_in_users, vec![WPrimeModelType::Weigend]);
    }

    #[test]
    fn test_normalized_clamps_to_floors() {
        let raw = ConfigurationSnapshot {
            critical_power_watts: 0.0,
            anaerobic_capacity_joules: -500.0,
            tau_recovery_seconds: f64::NAN,
            k_in: 0.0,
            model: WPrimeModelType::Weigend,
        };
        let normalized = raw.normalized();
        assert!((normalized.critical_power_watts - 1.0).abs() < f64::EPSILON);
        assert!((normalized.anaerobic_capacity_joules - 1.0).abs() < f64::EPSILON);
        assert!((normalized.tau_recovery_seconds - 1.0).abs() < f64::EPSILON);
        assert!(normalized.k_in > 0.0);
        assert_eq!(normalized.model, WPrimeModelType::Weigend);
    }

    #[test]
    fn test_normalized_keeps_valid_values() {
        let config = ConfigurationSnapshot::default();
        assert_eq!(config.normalized(), config);
    }

    #[test]
    fn test_snapshot_serde_uses_snake_case_model() {
        let config = ConfigurationSnapshot::for_model(WPrimeModelType::CaenLievens);
        let json = serde_json::to_value(config).unwrap();
        assert_eq!(json["model"], "caen_lievens");
        let back: ConfigurationSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_summary_mentions_only_used_parameters() {
        let bartram = ConfigurationSnapshot::for_model(WPrimeModelType::Bartram).summary();
        assert!(bartram.contains("Tau: 300s"));
        assert!(!bartram.contains("kIn"));

        let weigend = ConfigurationSnapshot::for_model(WPrimeModelType::Weigend).summary();
        assert!(weigend.contains("kIn: 0.002"));
        assert!(!weigend.contains("Tau"));
    }
}
