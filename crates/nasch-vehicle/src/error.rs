use nasch_core::VehicleId;
use nasch_lane::LaneError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VehicleError {
    #[error("{0} committed without computing a move this step")]
    NotComputed(VehicleId),

    #[error("lane error: {0}")]
    Lane(#[from] LaneError),
}

pub type VehicleResult<T> = Result<T, VehicleError>;
