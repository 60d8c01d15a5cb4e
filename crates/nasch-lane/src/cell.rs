use std::fmt;

/// A cell coordinate on the lane.
///
/// Cells produced by a [`Lane`][crate::Lane] are always normalized into
/// `[0, width) × [0, height)`.  A hand-built `Cell` may lie outside that
/// range; every `Lane` method wraps it before use.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: u32,
    pub y: u32,
}

impl Cell {
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
