//! `nasch-metrics` — in-memory metrics sink for the nasch traffic simulation.
//!
//! [`DataCollector`] implements `nasch_sim::SimObserver` and keeps two tables:
//!
//! | Table          | One row per              | Columns                              |
//! |----------------|--------------------------|--------------------------------------|
//! | model rows     | capture                  | `step`, `average_speed`              |
//! | vehicle rows   | vehicle per capture      | `step`, `vehicle_id`, `x`, `y`, `speed` |
//!
//! The first capture is the initial state (`step == 0`, average 0), taken by
//! the builder; every completed step adds one more.
//!
//! # Usage
//!
//! ```rust,ignore
//! use nasch_metrics::DataCollector;
//!
//! let mut sim = SimBuilder::new(SimConfig::default(), DataCollector::new()).build()?;
//! sim.run()?;
//! let history = sim.observer().average_speeds();
//! ```

pub mod collector;
pub mod row;


pub use collector::DataCollector;
pub use row::{ModelRow, VehicleRow};
