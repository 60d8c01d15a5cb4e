//! `nasch-lane` — the toroidal grid vehicles drive on.
//!
//! # Crate layout
//!
//! | Module     | Contents                                               |
//! |------------|--------------------------------------------------------|
//! | [`cell`]   | `Cell` coordinate                                      |
//! | [`lane`]   | `Lane` — occupancy, wraparound, placement and movement |
//! | [`error`]  | `LaneError`, `LaneResult<T>`                           |
//!
//! The lane is mutated only from the single-threaded commit phase; the
//! compute phase shares it as `&Lane`.
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                  |
//! |-----------|---------------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for the position map.         |
//! | `serde`   | Derives `Serialize`/`Deserialize` on `Cell`.            |

pub mod cell;
pub mod error;
pub mod lane;


pub use cell::Cell;
pub use error::{LaneError, LaneResult};
pub use lane::Lane;
