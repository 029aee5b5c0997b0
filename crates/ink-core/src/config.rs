//! Runtime configuration for the engine.
//!
//! Every field defaults to the matching entry in [`crate::constants`]; the
//! frontend may override individual fields before constructing a
//! [`crate::Controller`].

use crate::constants::*;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Seconds per animation loop.
    pub cycle_secs: f64,
    /// Upper bound applied to the device pixel ratio.
    pub max_dpr: f64,
    /// CSS pixels around the grid.
    pub padding: f64,
    /// CSS pixels between slots (also the selector label height).
    pub gap: f64,
    /// Pad-normalized capture radius for parameter markers.
    pub capture_radius: f64,
    /// Fraction of the pad height used by the timeline scrubber.
    pub timeline_strip: f64,
    /// Rolling average above which a cell shows its draw cost.
    pub cost_budget_ms: f64,
    /// Capacity of each cell's cost averager.
    pub cost_samples: usize,
    /// Letter stroke width in device pixels.
    pub stroke_px: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cycle_secs: CYCLE_SECS,
            max_dpr: MAX_DPR,
            padding: PADDING,
            gap: GAP,
            capture_radius: CAPTURE_RADIUS,
            timeline_strip: TIMELINE_STRIP,
            cost_budget_ms: COST_BUDGET_MS,
            cost_samples: COST_SAMPLES,
            stroke_px: STROKE_PX,
        }
    }
}

impl Config {
    pub fn with_cycle_secs(mut self, secs: f64) -> Self {
        if secs.is_finite() && secs > 0.0 {
            self.cycle_secs = secs;
        } else {
            log::warn!("[config] ignoring cycle_secs={}", secs);
        }
        self
    }

    pub fn with_max_dpr(mut self, max_dpr: f64) -> Self {
        if max_dpr.is_finite() && max_dpr >= 1.0 {
            self.max_dpr = max_dpr;
        } else {
            log::warn!("[config] ignoring max_dpr={}", max_dpr);
        }
        self
    }
}
