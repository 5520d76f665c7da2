// ABOUTME: Simplified three-tank hydraulic W' balance model after Weigend 2022
// ABOUTME: Top tank holds W'; middle and bottom tanks refill it at rates gated by kIn and fill levels
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::{Intensity, IntegrationStep};
use crate::constants::models::weigend::{
    BOTTOM_TANK_SCALE, FULL_LEVEL_EPSILON, MAX_STEP_SECONDS, MAX_SUB_STEPS, MIDDLE_TANK_SCALE,
};

/// Hydraulic tank levels, each a fill fraction in `[0, 1]`
///
/// - top tank: W' itself (`W'bal = top_level * W'`)
/// - middle tank: reserve that flows into the top tank at
///   `k_in * middle * (1 - top)` per second
/// - bottom tank: refills the middle tank at `k_in * bottom * (1 - middle)`,
///   and is refilled by aerobic supply at `k_in * (D_CP / CP) * (1 - bottom)`
///
/// Work above CP is drawn straight from the top tank and the lower tanks hold
/// still. Below CP the flows are integrated in sub-steps of at most one
/// second, up to [`MAX_SUB_STEPS`] per sample; longer steps use wider
/// sub-steps. Recovery stops early once every tank is full.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HydraulicState {
    /// Top tank fill fraction
    pub top_level: f64,
    /// Middle tank fill fraction
    pub middle_level: f64,
    /// Bottom tank fill fraction
    pub bottom_level: f64,
}

impl HydraulicState {
    /// All tanks full
    #[must_use]
    pub const fn full() -> Self {
        Self {
            top_level: 1.0,
            middle_level: 1.0,
            bottom_level: 1.0,
        }
    }

    /// Apply one step
    pub fn advance(&mut self, step: &IntegrationStep) {
        match step.intensity() {
            Intensity::Above(excess) => {
                let drawn = excess * step.dt_seconds / step.anaerobic_capacity_joules;
                self.top_level = (self.top_level - drawn).max(0.0);
            }
            Intensity::Below(d_cp) => {
                let supply = d_cp / step.critical_power_watts;
                let sub_steps = (step.dt_seconds / MAX_STEP_SECONDS)
                    .ceil()
                    .clamp(1.0, f64::from(MAX_SUB_STEPS));
                let h = step.dt_seconds / sub_steps;
                for _ in 0..sub_steps as u32 {
                    if self.is_full() {
                        break;
                    }
                    self.flow(step.k_in, supply, h);
                }
            }
            Intensity::AtCritical => {}
        }
        self.clamp_levels();
    }

    fn flow(&mut self, k_in: f64, supply: f64, h: f64) {
        let into_top = k_in * self.middle_level * (1.0 - self.top_level) * h;
        let into_middle = k_in * self.bottom_level * (1.0 - self.middle_level) * h;
        let into_bottom = k_in * supply * (1.0 - self.bottom_level) * h;

        self.top_level += into_top;
        self.middle_level += into_middle - into_top / MIDDLE_TANK_SCALE;
        self.bottom_level += into_bottom - into_middle * MIDDLE_TANK_SCALE / BOTTOM_TANK_SCALE;
        self.clamp_levels();
    }

    fn is_full(&self) -> bool {
        [self.top_level, self.middle_level, self.bottom_level]
            .iter()
            .all(|level| *level >= 1.0 - FULL_LEVEL_EPSILON)
    }

    fn clamp_levels(&mut self) {
        self.top_level = self.top_level.clamp(0.0, 1.0);
        self.middle_level = self.middle_level.clamp(0.0, 1.0);
        self.bottom_level = self.bottom_level.clamp(0.0, 1.0);
    }

    /// Remaining W' (joules)
    #[must_use]
    pub fn balance(&self, capacity: f64) -> f64 {
        (self.top_level * capacity).clamp(0.0, capacity)
    }
}
