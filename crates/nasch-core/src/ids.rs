//! Strongly typed identifier wrappers.
//!
//! `VehicleId` is `Copy + Ord + Hash` so it can key maps and sort without
//! ceremony.  The inner integer is `pub` and doubles as the index into every
//! per-vehicle `Vec`; prefer `.index()` at call sites.

use std::fmt;

/// Index of a vehicle in the simulation's fixed vehicle collection.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleId(pub u32);

impl VehicleId {
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VehicleId({})", self.0)
    }
}
