//! Top-level simulation configuration.

use crate::{ConfigError, ConfigResult, Step};

/// Reference lane length (cells).
pub const DEFAULT_WIDTH: u32 = 60;
/// Reference lane height.  The model is single-lane, so this stays 1.
pub const DEFAULT_HEIGHT: u32 = 1;
pub const DEFAULT_VEHICLE_COUNT: usize = 5;
pub const DEFAULT_MAX_SPEED: u32 = 4;
/// Steps after which the simulation stops running.
pub const DEFAULT_STEP_BUDGET: u64 = 100;
pub const DEFAULT_SEED: u64 = 42;

/// Simulation configuration.
///
/// `Default` gives the reference ring: 60 cells, 5 vehicles, max speed 4,
/// 100 steps.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Number of cells along the lane (the x axis).
    pub width: u32,

    /// Number of rows.  Kept for generality; vehicles only ever move along x.
    pub height: u32,

    /// Vehicles placed at initialization.  Fixed for the whole run.
    pub vehicle_count: usize,

    /// Max speed (cells per step) given to every vehicle unless overridden
    /// per vehicle by the builder.
    pub max_speed: u32,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Total steps to simulate before `running` turns false.
    pub step_budget: u64,

    /// Worker thread count for the parallel compute phase.  `None` uses
    /// Rayon's global pool.  Ignored without the `parallel` feature.
    pub num_threads: Option<usize>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width:         DEFAULT_WIDTH,
            height:        DEFAULT_HEIGHT,
            vehicle_count: DEFAULT_VEHICLE_COUNT,
            max_speed:     DEFAULT_MAX_SPEED,
            seed:          DEFAULT_SEED,
            step_budget:   DEFAULT_STEP_BUDGET,
            num_threads:   None,
        }
    }
}

impl SimConfig {
    /// Number of cells on the lane.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// The step at which the simulation stops running.
    #[inline]
    pub fn end_step(&self) -> Step {
        Step(self.step_budget)
    }

    /// Check every field; the first violation wins.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if self.height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        if self.max_speed == 0 {
            return Err(ConfigError::ZeroMaxSpeed);
        }
        if self.step_budget == 0 {
            return Err(ConfigError::ZeroStepBudget);
        }
        if self.vehicle_count > self.capacity() {
            return Err(ConfigError::TooManyVehicles {
                requested: self.vehicle_count,
                capacity:  self.capacity(),
            });
        }
        Ok(())
    }
}
