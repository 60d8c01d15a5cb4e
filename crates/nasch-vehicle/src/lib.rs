//! `nasch-vehicle` — per-vehicle state and the NaSch update rule.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`rules`]   | The four rules as pure functions, `SLOWDOWN_PROBABILITY`      |
//! | [`pending`] | `PendingMove`, `Phase`                                        |
//! | [`vehicle`] | `Vehicle` — `compute` and `commit`                            |
//! | [`store`]   | `VehicleRngs` — one RNG stream per vehicle                    |
//! | [`error`]   | `VehicleError`, `VehicleResult<T>`                            |
//!
//! # Design notes
//!
//! Every step runs in two phases driven by `nasch-sim`:
//!
//! 1. **Compute** (parallelizable): each vehicle reads the lane through
//!    `&Lane`, draws from its own RNG, and stores a [`PendingMove`].  No
//!    shared state is written, so no vehicle can see another vehicle's
//!    updated position within the same step.
//!
//! 2. **Commit** (sequential, any order): each vehicle applies its pending
//!    move to `&mut Lane`.  Destinations are pairwise disjoint because the
//!    gap check never lets a vehicle reach the cell of the vehicle ahead.
//!
//! Vehicles hold no reference to the simulation; the lane and random source
//! are passed in per call.

pub mod error;
pub mod pending;
pub mod rules;
pub mod store;
pub mod vehicle;


pub use error::{VehicleError, VehicleResult};
pub use pending::{PendingMove, Phase};
pub use rules::SLOWDOWN_PROBABILITY;
pub use store::VehicleRngs;
pub use vehicle::Vehicle;
