//! Deterministic per-vehicle and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Initial placement draws from a single `SimRng` seeded with the run seed.
//! Random braking draws from one `VehicleRng` per vehicle, seeded by:
//!
//!   seed = global_seed XOR (vehicle_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive ids across the seed space.  Because every
//! vehicle owns its stream, the compute phase gives the same result whatever
//! order (or thread) the vehicles are visited in.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::VehicleId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── UniformSource ─────────────────────────────────────────────────────────────

/// A source of uniform draws in `[0, 1)`.
///
/// This is the only randomness the update rule consumes.  Production code
/// uses [`VehicleRng`]; tests can substitute a scripted sequence.
pub trait UniformSource {
    fn next_unit(&mut self) -> f64;
}

// ── VehicleRng ────────────────────────────────────────────────────────────────

/// Per-vehicle deterministic RNG.
///
/// Create one per vehicle at simulation init and keep them in a parallel
/// `Vec` so the compute phase can hand each worker its own stream.
pub struct VehicleRng(SmallRng);

impl VehicleRng {
    /// Seed deterministically from the run's global seed and a vehicle ID.
    pub fn new(global_seed: u64, vehicle: VehicleId) -> Self {
        let seed = global_seed ^ (vehicle.0 as u64).wrapping_mul(MIXING_CONSTANT);
        VehicleRng(SmallRng::seed_from_u64(seed))
    }
}

impl UniformSource for VehicleRng {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for global operations (seeding, initial placement).
///
/// Used only in single-threaded contexts.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Draw a fresh seed for a downstream generator, e.g. the per-vehicle
    /// streams, so they never replay this generator's own sequence.
    #[inline]
    pub fn next_seed(&mut self) -> u64 {
        self.0.r#gen::<u64>() ^ MIXING_CONSTANT
    }

    /// Sample `amount` distinct indices from `0..length`, uniformly and
    /// without replacement.
    ///
    /// Returns `None` if `amount > length`.
    pub fn sample_distinct(&mut self, length: usize, amount: usize) -> Option<Vec<usize>> {
        if amount > length {
            return None;
        }
        Some(rand::seq::index::sample(&mut self.0, length, amount).into_vec())
    }
}
