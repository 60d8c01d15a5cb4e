//! A single vehicle and its two-phase update.

use nasch_core::{UniformSource, VehicleId};
use nasch_lane::{Cell, Lane};

use crate::rules::{accelerate, advance, gap_ahead, randomize};
use crate::{PendingMove, Phase, VehicleError, VehicleResult};

/// One single-cell vehicle.
///
/// `position` and `speed` describe the last committed state; a computed but
/// uncommitted move lives in `pending` until [`commit`][Self::commit].
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id:        VehicleId,
    pub position:  Cell,
    /// Always in `0..=max_speed`.
    pub speed:     u32,
    pub max_speed: u32,
    pending:       Option<PendingMove>,
}

impl Vehicle {
    /// A stopped vehicle at `position`.
    pub fn new(id: VehicleId, position: Cell, max_speed: u32) -> Self {
        Self {
            id,
            position,
            speed: 0,
            max_speed,
            pending: None,
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        if self.pending.is_some() { Phase::Computed } else { Phase::Idle }
    }

    #[inline]
    pub fn pending(&self) -> Option<&PendingMove> {
        self.pending.as_ref()
    }

    /// Compute phase: apply the four rules against the current lane.
    ///
    /// Reads `lane` only and consumes exactly one draw from `rng`.  Any stale
    /// pending move is overwritten.  Returns the new speed, which is this
    /// vehicle's contribution to the step's total speed.
    pub fn compute<U: UniformSource + ?Sized>(&mut self, lane: &Lane, rng: &mut U) -> u32 {
        let tentative = accelerate(self.speed, self.max_speed);
        let gapped = gap_ahead(lane, self.position, tentative);
        // Draw even when stopped so each stream advances once per step.
        let draw = rng.next_unit();
        let speed = randomize(gapped, draw);
        let destination = advance(lane, self.position, speed);

        self.pending = Some(PendingMove { speed, destination });
        speed
    }

    /// Commit phase: move to the pending destination.
    ///
    /// # Errors
    ///
    /// `NotComputed` if [`compute`][Self::compute] has not run since the last
    /// commit; `Lane` if the lane rejects the move (an invariant breach).
    /// On error the vehicle keeps its committed state and the pending move
    /// is dropped.
    pub fn commit(&mut self, lane: &mut Lane) -> VehicleResult<()> {
        let PendingMove { speed, destination } =
            self.pending.take().ok_or(VehicleError::NotComputed(self.id))?;
        lane.move_vehicle(self.id, destination)?;
        self.position = destination;
        self.speed = speed;
        Ok(())
    }
}
