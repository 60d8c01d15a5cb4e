//! The `Sim` struct and its step loop.

use log::{debug, error, info};
use nasch_core::{SimConfig, Step, VehicleId};
use nasch_lane::Lane;
use nasch_vehicle::{Vehicle, VehicleRngs};

use crate::{NoopObserver, SimError, SimObserver, SimResult};

/// The simulation runner.
///
/// `Sim<O>` owns the lane, the fixed vehicle collection and the metrics sink,
/// and drives the two-phase step:
///
/// 1. **Compute** (optionally parallel with the `parallel` feature): every
///    vehicle runs the four rules against the unmodified lane and returns its
///    new speed.  The returned speeds are summed after the phase completes.
/// 2. **Commit** (sequential, any order): every vehicle moves to its pending
///    destination.  No commit starts before every compute has finished.
///
/// Lifecycle is `Initialized → Running → Terminated`; the builder returns a
/// running simulation and `running` turns false once `step_budget` steps have
/// completed.  Further calls to [`step`][Self::step] fail with
/// [`SimError::Terminated`].
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<O: SimObserver = NoopObserver> {
    pub(crate) config:        SimConfig,
    pub(crate) lane:          Lane,
    /// Indexed by `VehicleId`.  Never grows or shrinks after build.
    pub(crate) vehicles:      Vec<Vehicle>,
    pub(crate) rngs:          VehicleRngs,
    pub(crate) observer:      O,
    pub(crate) step_count:    Step,
    /// Sum of speeds computed in the latest step.
    pub(crate) total_speed:   u64,
    pub(crate) average_speed: f64,
    /// One entry per completed step.
    pub(crate) averages:      Vec<f64>,
    pub(crate) running:       bool,
    #[cfg(feature = "parallel")]
    pub(crate) pool:          Option<rayon::ThreadPool>,
}

impl<O: SimObserver> Sim<O> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Advance every vehicle by one step and return the step's average speed.
    ///
    /// # Errors
    ///
    /// `Terminated` once the step budget is spent.  `Vehicle` if a commit
    /// is rejected by the lane, which means the gap check let two vehicles
    /// target the same cell; the simulation stops running in that case.
    ///
    /// A failed commit is not rolled back.  Vehicles committed before the
    /// failing one have moved; the failing one keeps its old cell; later
    /// ones still hold their pending moves.  `step_count`, `averages` and the
    /// observer are not updated for the partial step.
    pub fn step(&mut self) -> SimResult<f64> {
        if !self.running {
            return Err(SimError::Terminated(self.step_count));
        }

        let step = self.step_count.next();
        self.observer.on_step_start(step);

        // ── Phase 1: compute ──────────────────────────────────────────────
        self.total_speed = self.compute_phase();

        // ── Phase 2: commit ───────────────────────────────────────────────
        self.commit_phase(step)?;

        self.average_speed = if self.vehicles.is_empty() {
            0.0
        } else {
            self.total_speed as f64 / self.vehicles.len() as f64
        };
        self.averages.push(self.average_speed);
        self.step_count = step;
        debug!(
            "{step}: total speed {} over {} vehicles, mean {:.3}",
            self.total_speed,
            self.vehicles.len(),
            self.average_speed,
        );

        self.capture();

        if self.step_count >= self.config.end_step() {
            self.running = false;
            info!(
                "step budget reached at {}; mean speed over run {:.3}",
                self.step_count,
                self.averages.iter().sum::<f64>() / self.averages.len() as f64,
            );
            self.observer.on_sim_end(self.step_count);
        }

        Ok(self.average_speed)
    }

    /// Step until the step budget is spent.
    pub fn run(&mut self) -> SimResult<()> {
        while self.running {
            self.step()?;
        }
        Ok(())
    }

    /// Run at most `n` steps, stopping early if the budget runs out.
    pub fn run_steps(&mut self, n: u64) -> SimResult<()> {
        for _ in 0..n {
            if !self.running {
                break;
            }
            self.step()?;
        }
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn lane(&self) -> &Lane {
        &self.lane
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(id.index())
    }

    #[inline]
    pub fn running(&self) -> bool {
        self.running
    }

    /// Completed steps.  `Step(0)` right after build.
    #[inline]
    pub fn step_count(&self) -> Step {
        self.step_count
    }

    pub fn total_speed(&self) -> u64 {
        self.total_speed
    }

    /// Average speed of the latest step; 0 before the first step or with no
    /// vehicles.
    pub fn average_speed(&self) -> f64 {
        self.average_speed
    }

    /// Average speed of every completed step, oldest first.
    pub fn averages(&self) -> &[f64] {
        &self.averages
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    // ── Phases ────────────────────────────────────────────────────────────

    /// Run every vehicle's compute and reduce the returned speeds.
    ///
    /// With the `parallel` Cargo feature the vehicles are split across
    /// Rayon's pool (or the dedicated pool from `num_threads`).
    pub(crate) fn compute_phase(&mut self) -> u64 {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let lane     = &self.lane;
        let vehicles = &mut self.vehicles;
        let rngs     = &mut self.rngs;

        #[cfg(not(feature = "parallel"))]
        {
            vehicles
                .iter_mut()
                .zip(rngs.inner.iter_mut())
                .map(|(vehicle, rng)| u64::from(vehicle.compute(lane, rng)))
                .sum()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let mut phase = || {
                vehicles
                    .par_iter_mut()
                    .zip(rngs.inner.par_iter_mut())
                    .map(|(vehicle, rng)| u64::from(vehicle.compute(lane, rng)))
                    .sum::<u64>()
            };
            match &self.pool {
                Some(pool) => pool.install(phase),
                None       => phase(),
            }
        }
    }

    /// Apply every pending move.  Order is irrelevant: destinations are
    /// pairwise disjoint and never occupied at commit time.
    pub(crate) fn commit_phase(&mut self, step: Step) -> SimResult<()> {
        for vehicle in &mut self.vehicles {
            if let Err(e) = vehicle.commit(&mut self.lane) {
                error!("{step}: commit of {} failed: {e}", vehicle.id);
                self.running = false;
                return Err(e.into());
            }
        }
        Ok(())
    }

    /// Hand the current state to the metrics sink.
    pub(crate) fn capture(&mut self) {
        self.observer
            .on_capture(self.step_count, self.average_speed, &self.vehicles);
    }
}
