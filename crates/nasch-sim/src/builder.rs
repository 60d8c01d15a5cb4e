//! Fluent builder for constructing a [`Sim`].

use log::info;
use nasch_core::{ConfigError, SimConfig, SimRng, Step, VehicleId};
use nasch_lane::{Cell, Lane};
use nasch_vehicle::{Vehicle, VehicleRngs};

use crate::{Sim, SimError, SimObserver, SimResult};

/// Fluent builder for [`Sim<O>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — lane size, vehicle count, max speed, seed, step budget
/// - `O: SimObserver` — the metrics sink (use [`NoopObserver`][crate::NoopObserver]
///   if nothing needs recording)
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                                       |
/// |--------------------------|-----------------------------------------------|
/// | `.initial_positions(v)`  | `vehicle_count` distinct cells sampled from the seed |
/// | `.max_speeds(v)`         | `config.max_speed` for every vehicle          |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(SimConfig::default(), DataCollector::new())
///     .build()?;
/// sim.run()?;
/// ```
pub struct SimBuilder<O: SimObserver> {
    config:     SimConfig,
    observer:   O,
    positions:  Option<Vec<Cell>>,
    max_speeds: Option<Vec<u32>>,
}

impl<O: SimObserver> SimBuilder<O> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, observer: O) -> Self {
        Self {
            config,
            observer,
            positions:  None,
            max_speeds: None,
        }
    }

    /// Place vehicle `i` at `positions[i]` instead of sampling.
    ///
    /// Must be length `vehicle_count` with pairwise distinct cells (after
    /// wraparound).  Coordinates outside the lane are wrapped.
    pub fn initial_positions(mut self, positions: Vec<Cell>) -> Self {
        self.positions = Some(positions);
        self
    }

    /// Give vehicle `i` its own max speed `max_speeds[i]`.
    ///
    /// Must be length `vehicle_count`; every entry must be positive.
    pub fn max_speeds(mut self, max_speeds: Vec<u32>) -> Self {
        self.max_speeds = Some(max_speeds);
        self
    }

    /// Validate inputs, place the vehicles, capture the initial state, and
    /// return a running [`Sim`].
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` for a bad config or a zero per-vehicle max
    /// speed, `VehicleCountMismatch` for wrongly sized optional inputs, and
    /// `Lane` if two supplied positions coincide.
    pub fn build(self) -> SimResult<Sim<O>> {
        let config = self.config;
        config.validate()?;
        let count = config.vehicle_count;

        // ── Validate and resolve optional inputs ──────────────────────────
        let max_speeds = match self.max_speeds {
            Some(v) => {
                if v.len() != count {
                    return Err(SimError::VehicleCountMismatch {
                        expected: count,
                        got:      v.len(),
                        what:     "max speeds",
                    });
                }
                if v.contains(&0) {
                    return Err(ConfigError::ZeroMaxSpeed.into());
                }
                v
            }
            None => vec![config.max_speed; count],
        };

        let mut lane = Lane::new(config.width, config.height)?;

        // The per-vehicle streams are seeded first so they do not depend on
        // whether positions were sampled or supplied.
        let mut root = SimRng::new(config.seed);
        let rngs = VehicleRngs::new(count, root.next_seed());

        let positions: Vec<Cell> = match self.positions {
            Some(p) => {
                if p.len() != count {
                    return Err(SimError::VehicleCountMismatch {
                        expected: count,
                        got:      p.len(),
                        what:     "initial positions",
                    });
                }
                p
            }
            None => root
                .sample_distinct(lane.capacity(), count)
                .ok_or(ConfigError::TooManyVehicles {
                    requested: count,
                    capacity:  lane.capacity(),
                })?
                .into_iter()
                .map(|i| lane.cell_at(i))
                .collect(),
        };

        // ── Place vehicles ────────────────────────────────────────────────
        let mut vehicles = Vec::with_capacity(count);
        for (i, (cell, max_speed)) in positions.into_iter().zip(max_speeds).enumerate() {
            let id = VehicleId(i as u32);
            let cell = lane.offset(cell, 0, 0);
            lane.place(id, cell)?;
            vehicles.push(Vehicle::new(id, cell, max_speed));
        }

        #[cfg(feature = "parallel")]
        let pool = match config.num_threads {
            Some(n) => Some(rayon::ThreadPoolBuilder::new().num_threads(n).build()?),
            None    => None,
        };

        info!(
            "placed {} vehicles on a {}x{} ring (max speed {}, seed {}, budget {} steps)",
            vehicles.len(),
            config.width,
            config.height,
            config.max_speed,
            config.seed,
            config.step_budget,
        );

        let mut sim = Sim {
            config,
            lane,
            vehicles,
            rngs,
            observer:      self.observer,
            step_count:    Step::ZERO,
            total_speed:   0,
            average_speed: 0.0,
            averages:      Vec::new(),
            running:       true,
            #[cfg(feature = "parallel")]
            pool,
        };
        sim.capture();
        Ok(sim)
    }
}
