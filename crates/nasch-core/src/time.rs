//! Discrete simulation time.
//!
//! The NaSch model has no wall-clock mapping: one `Step` is one synchronous
//! update of every vehicle.  Step 0 is the initial placement, before any
//! update has run.

use std::fmt;

/// Number of completed update steps.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step(pub u64);

impl Step {
    pub const ZERO: Step = Step(0);

    #[inline]
    pub fn next(self) -> Step {
        Step(self.0 + 1)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}
