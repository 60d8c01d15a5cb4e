//! `nasch-core` — foundational types for the `nasch` traffic simulation.
//!
//! This crate is a dependency of every other `nasch-*` crate.  It has no
//! `nasch-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `VehicleId`                                           |
//! | [`time`]        | `Step`                                                |
//! | [`rng`]         | `UniformSource`, `VehicleRng` (per-vehicle), `SimRng` |
//! | [`config`]      | `SimConfig` and the reference defaults                |
//! | [`error`]       | `ConfigError`, `ConfigResult`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SimConfig;
pub use error::{ConfigError, ConfigResult};
pub use ids::VehicleId;
pub use rng::{SimRng, UniformSource, VehicleRng};
pub use time::Step;
