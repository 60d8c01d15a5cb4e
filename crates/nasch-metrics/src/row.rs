//! Plain data rows recorded by the collector.

/// Model-level state at one capture.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelRow {
    pub step:          u64,
    /// Mean speed over all vehicles; 0 at the initial capture.
    pub average_speed: f64,
}

/// One vehicle's state at one capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleRow {
    pub step:       u64,
    pub vehicle_id: u32,
    pub x:          u32,
    pub y:          u32,
    pub speed:      u32,
}
