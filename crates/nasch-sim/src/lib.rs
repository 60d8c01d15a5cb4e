//! `nasch-sim` — step loop orchestrator for the nasch traffic simulation.
//!
//! # Two-phase step
//!
//! ```text
//! while sim.running():
//!   ① Compute — every vehicle runs accelerate → gap check → random braking
//!               → movement against the untouched lane, storing a pending
//!               move and returning its speed (parallel with `parallel`).
//!   ② Reduce  — total_speed = Σ returned speeds; average = total / n.
//!   ③ Commit  — every vehicle moves to its pending destination, any order.
//!   ④ Capture — the observer records the average and each vehicle's
//!               position and speed; running turns false at the budget.
//! ```
//!
//! Phase ① finishes for all vehicles before phase ③ starts.  Moving each
//! vehicle straight after its own compute would let later vehicles see
//! earlier ones' new positions, which is a different (sequential-update)
//! model.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the compute phase on Rayon's thread pool.         |
//! | `fx-hash`  | FxHash for the lane's position map.                    |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use nasch_core::SimConfig;
//! use nasch_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default(), NoopObserver).build()?;
//! sim.run()?;
//! println!("{:?}", sim.averages());
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
