//! The four Nagel–Schreckenberg rules.
//!
//! Each rule is a pure function of the vehicle's state, the lane, and (for
//! braking) one uniform draw.  [`Vehicle::compute`][crate::Vehicle::compute]
//! chains them in order.

use nasch_lane::{Cell, Lane};

/// Chance that a moving vehicle brakes by one cell per step.
pub const SLOWDOWN_PROBABILITY: f64 = 0.3;

/// Rule 1: speed up by one, capped at `max_speed`.
#[inline]
pub fn accelerate(speed: u32, max_speed: u32) -> u32 {
    if speed < max_speed { speed + 1 } else { max_speed }
}

/// Rule 2: count consecutive empty cells ahead of `from`, at most `limit`.
///
/// Scanning starts one cell ahead along +x and stops at the first occupied
/// cell.  The scanning vehicle's own cell is only reached after a full lap,
/// where it counts as occupied, so the result never exceeds `width - 1`.
pub fn gap_ahead(lane: &Lane, from: Cell, limit: u32) -> u32 {
    let mut gap = 0;
    while gap < limit {
        let probe = lane.offset(from, gap as i64 + 1, 0);
        if !lane.is_empty(probe) {
            break;
        }
        gap += 1;
    }
    gap
}

/// Rule 3: brake by one with [`SLOWDOWN_PROBABILITY`] if moving.
///
/// `draw` must be uniform in `[0, 1)`.  A stopped vehicle stays stopped.
#[inline]
pub fn randomize(speed: u32, draw: f64) -> u32 {
    if draw < SLOWDOWN_PROBABILITY && speed > 0 {
        speed - 1
    } else {
        speed
    }
}

/// Rule 4: the cell `speed` cells ahead of `from`, wrapped.
#[inline]
pub fn advance(lane: &Lane, from: Cell, speed: u32) -> Cell {
    lane.offset(from, speed as i64, 0)
}
