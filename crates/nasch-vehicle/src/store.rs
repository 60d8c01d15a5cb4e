//! `VehicleRngs` — per-vehicle random streams.
//!
//! Kept apart from the `Vec<Vehicle>` so the compute phase can hold
//! `&mut [Vehicle]`, `&mut VehicleRngs` and `&Lane` at the same time:
//!
//! ```ignore
//! let total: u64 = vehicles
//!     .iter_mut()
//!     .zip(rngs.inner.iter_mut())
//!     .map(|(v, rng)| v.compute(&lane, rng) as u64)
//!     .sum();
//! ```

use nasch_core::{VehicleId, VehicleRng};

/// One [`VehicleRng`] per vehicle, indexed by `VehicleId`.
///
/// `Send` but not shared: Rayon's `par_iter_mut()` hands each stream to
/// exactly one worker.
pub struct VehicleRngs {
    pub inner: Vec<VehicleRng>,
}

impl VehicleRngs {
    /// Allocate and seed `count` streams from `global_seed`.
    pub fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| VehicleRng::new(global_seed, VehicleId(i)))
            .collect();
        Self { inner }
    }
}
