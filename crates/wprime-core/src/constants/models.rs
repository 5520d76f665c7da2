// ABOUTME: Coefficients for the W' depletion and reconstitution models
// ABOUTME: Published Skiba 2012 constants plus engineering defaults for the domain, bi-exponential, and hydraulic models
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Model coefficients
//!
//! Only the Skiba 2012 group carries published values. The Caen/Lievens,
//! Chorley and Weigend groups are engineering defaults that give each model
//! its published shape; they are not the fitted coefficients from those
//! papers and should be replaced once those values are confirmed.
//!
//! The Skiba differential and Bartram models need no fixed coefficients: the
//! differential time constant is derived from W' and the distance below CP,
//! and Bartram uses the athlete's own tau.

/// Skiba integral model recovery time constant
///
/// `tau = A * exp(-k * D_CP) + offset`, with `D_CP = CP - P` in watts.
///
/// Reference: Skiba, P.F., Chidnok, W., Vanhatalo, A., & Jones, A.M. (2012).
/// Modeling the expenditure and reconstitution of work capacity above critical power.
/// *Medicine & Science in Sports & Exercise*, 44(8), 1526-1532.
pub mod skiba_2012 {
    /// Amplitude of the exponential term (seconds)
    pub const TAU_AMPLITUDE_SECONDS: f64 = 546.0;
    /// Decay rate of the exponential term (per watt below CP)
    pub const TAU_DECAY_PER_WATT: f64 = 0.01;
    /// Constant offset (seconds)
    pub const TAU_OFFSET_SECONDS: f64 = 316.0;
}

/// Domain-dependent recovery time constants (engineering defaults)
///
/// Recovery below CP is classified by intensity as a fraction of CP; the
/// closer to CP, the slower W' reconstitutes. The cut points and taus below
/// are chosen to reproduce that ordering and are not taken from the papers.
///
/// Model shape: Caen, K., Bourgois, J.G., Bourgois, G., Van Der Stede, T.,
/// Vermeire, K., & Boone, J. (2019). The reconstitution of W' depends on both
/// work and recovery characteristics. *Medicine & Science in Sports & Exercise*,
/// 51(8), 1745-1751. Lievens, M., Caen, K., Bourgois, J.G., Vermeire, K., &
/// Boone, J. (2021). W' reconstitution accelerates more with decreasing
/// intensity in the heavy- versus the moderate-intensity domain.
/// *Medicine & Science in Sports & Exercise*, 53(6), 1276-1284.
pub mod caen_lievens {
    /// Power at or above this fraction of CP (and below CP) is the heavy domain
    pub const HEAVY_DOMAIN_MIN_FRACTION: f64 = 0.9;
    /// Power at or above this fraction of CP (and below heavy) is the moderate domain
    pub const MODERATE_DOMAIN_MIN_FRACTION: f64 = 0.5;
    /// Recovery tau in the heavy domain (seconds)
    pub const HEAVY_TAU_SECONDS: f64 = 600.0;
    /// Recovery tau in the moderate domain (seconds)
    pub const MODERATE_TAU_SECONDS: f64 = 400.0;
    /// Recovery tau below the moderate domain (seconds)
    pub const LIGHT_TAU_SECONDS: f64 = 280.0;
}

/// Bi-exponential recovery components (engineering defaults)
///
/// A fast and a slow component with fixed taus. The share and taus are not
/// the fitted values from the paper.
///
/// Model shape: Chorley, A., Bott, R.P., Marwood, S., & Lamb, K.L. (2023).
/// Bi-exponential modelling of W' reconstitution kinetics in trained cyclists.
/// *European Journal of Applied Physiology*, 123, 677-690.
pub mod chorley {
    /// Share of W' held by the fast component
    pub const FAST_COMPONENT_FRACTION: f64 = 0.5;
    /// Fast component recovery tau (seconds)
    pub const FAST_TAU_SECONDS: f64 = 30.0;
    /// Slow component recovery tau (seconds)
    pub const SLOW_TAU_SECONDS: f64 = 400.0;
}

/// Simplified three-tank hydraulic geometry (engineering defaults)
///
/// Tank capacities are expressed as multiples of W' (the top tank). This is a
/// reduced form of the published model: it keeps the top/middle/bottom flow
/// structure gated by `k_in` but not the paper's tank and pipe geometry.
///
/// Model shape: Weigend, F.C., Clarke, D.C., Obst, O., & Siegler, J. (2022).
/// A hydraulic model outperforms work-balance models for predicting recovery
/// kinetics from intermittent exercise. *Annals of Operations Research*, 325, 589-613.
pub mod weigend {
    /// Middle tank capacity relative to W'
    pub const MIDDLE_TANK_SCALE: f64 = 2.0;
    /// Bottom tank capacity relative to W'
    pub const BOTTOM_TANK_SCALE: f64 = 4.0;
    /// Largest integration sub-step at normal sample cadence (seconds)
    pub const MAX_STEP_SECONDS: f64 = 1.0;
    /// Upper bound on sub-steps per sample; longer steps widen each sub-step
    pub const MAX_SUB_STEPS: u32 = 3_600;
    /// Fill fraction treated as a full tank when ending recovery early
    pub const FULL_LEVEL_EPSILON: f64 = 1e-9;
}
