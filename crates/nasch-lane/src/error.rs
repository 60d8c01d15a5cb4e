use nasch_core::VehicleId;
use thiserror::Error;

use crate::Cell;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaneError {
    #[error("lane dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Two vehicles targeted the same cell.  Unreachable while the gap check
    /// is correct; seeing it means the update rule is broken.
    #[error("cell {cell} is occupied by {occupant}, cannot take {incoming}")]
    OccupiedCell {
        cell:     Cell,
        occupant: VehicleId,
        incoming: VehicleId,
    },

    #[error("{0} is not on the lane")]
    NotPlaced(VehicleId),

    #[error("{vehicle} is already on the lane at {at}")]
    AlreadyPlaced { vehicle: VehicleId, at: Cell },
}

pub type LaneResult<T> = Result<T, LaneError>;
