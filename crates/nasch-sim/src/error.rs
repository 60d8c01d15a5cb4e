use nasch_core::{ConfigError, Step};
use nasch_lane::LaneError;
use nasch_vehicle::VehicleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error("{what} length {got} does not match vehicle count {expected}")]
    VehicleCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("lane error: {0}")]
    Lane(#[from] LaneError),

    #[error("vehicle error: {0}")]
    Vehicle(#[from] VehicleError),

    #[error("simulation terminated at {0}; no further steps")]
    Terminated(Step),

    #[cfg(feature = "parallel")]
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type SimResult<T> = Result<T, SimError>;
