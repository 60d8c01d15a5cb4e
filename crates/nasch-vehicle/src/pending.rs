//! The result of a vehicle's compute phase, waiting to be committed.

use nasch_lane::Cell;

/// A move computed in this step's compute phase.
///
/// Only meaningful between compute and commit of the same step; commit
/// consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingMove {
    /// Speed after all four rules.
    pub speed:       u32,
    /// Normalized destination cell.
    pub destination: Cell,
}

/// Where a vehicle is in the per-step state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No pending move: before compute, or after commit.
    Idle,
    /// Compute has run; waiting for commit.
    Computed,
}
