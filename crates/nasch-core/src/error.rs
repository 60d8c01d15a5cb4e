//! Configuration errors.
//!
//! Every variant is fatal at initialization: a simulation built from an
//! invalid `SimConfig` never enters the running state.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("lane width must be positive")]
    ZeroWidth,

    #[error("lane height must be positive")]
    ZeroHeight,

    #[error("max speed must be positive")]
    ZeroMaxSpeed,

    #[error("step budget must be positive")]
    ZeroStepBudget,

    #[error("{requested} vehicles do not fit on a lane with {capacity} cells")]
    TooManyVehicles {
        requested: usize,
        capacity:  usize,
    },
}

/// Shorthand result type for configuration validation.
pub type ConfigResult<T> = Result<T, ConfigError>;
