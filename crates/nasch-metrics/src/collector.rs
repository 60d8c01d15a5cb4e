//! `DataCollector` — records every capture into row tables.

use nasch_core::{Step, VehicleId};
use nasch_sim::SimObserver;
use nasch_vehicle::Vehicle;

use crate::row::{ModelRow, VehicleRow};

/// A [`SimObserver`] that keeps the full history in memory.
///
/// Vehicle rows are stored capture by capture, each block ordered by vehicle
/// id, so `vehicle_rows()[k * n + i]` is vehicle `i` at capture `k` when the
/// collector has only seen one simulation of `n` vehicles.
///
/// One collector can be lent to several simulations in turn (through the
/// `&mut O` observer impl).  A capture whose step does not advance past the
/// previous one starts a new run: earlier rows are kept, and
/// [`rows_at`][Self::rows_at] looks only at the latest run.
#[derive(Debug, Default, Clone)]
pub struct DataCollector {
    model_rows:   Vec<ModelRow>,
    vehicle_rows: Vec<VehicleRow>,
    /// Index into `vehicle_rows` where the latest run begins.
    run_start:    usize,
    runs:         usize,
    finished_at:  Option<Step>,
}

impl DataCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model_rows(&self) -> &[ModelRow] {
        &self.model_rows
    }

    pub fn vehicle_rows(&self) -> &[VehicleRow] {
        &self.vehicle_rows
    }

    /// Number of captures recorded, including the initial one.
    pub fn captures(&self) -> usize {
        self.model_rows.len()
    }

    /// The average-speed column, oldest first.
    pub fn average_speeds(&self) -> Vec<f64> {
        self.model_rows.iter().map(|r| r.average_speed).collect()
    }

    /// Every recorded row of one vehicle, oldest first.
    pub fn vehicle_series(&self, id: VehicleId) -> Vec<VehicleRow> {
        self.vehicle_rows
            .iter()
            .filter(|r| r.vehicle_id == id.0)
            .copied()
            .collect()
    }

    /// Every vehicle row captured at `step` in the latest run.
    pub fn rows_at(&self, step: Step) -> &[VehicleRow] {
        // Steps strictly increase within a run, so the block is contiguous.
        let run = &self.vehicle_rows[self.run_start..];
        let start = run.partition_point(|r| r.step < step.0);
        let end = run.partition_point(|r| r.step <= step.0);
        &run[start..end]
    }

    /// Number of simulations recorded since creation or the last `clear`.
    pub fn runs(&self) -> usize {
        self.runs
    }

    /// Step at which the latest run reported its end, if it has.
    pub fn finished_at(&self) -> Option<Step> {
        self.finished_at
    }

    /// Drop all recorded rows.
    pub fn clear(&mut self) {
        self.model_rows.clear();
        self.vehicle_rows.clear();
        self.run_start = 0;
        self.runs = 0;
        self.finished_at = None;
    }
}

impl SimObserver for DataCollector {
    fn on_capture(&mut self, step: Step, average_speed: f64, vehicles: &[Vehicle]) {
        if self.model_rows.last().is_none_or(|last| step.0 <= last.step) {
            self.run_start = self.vehicle_rows.len();
            self.runs += 1;
            self.finished_at = None;
        }
        self.model_rows.push(ModelRow { step: step.0, average_speed });
        self.vehicle_rows.extend(vehicles.iter().map(|v| VehicleRow {
            step:       step.0,
            vehicle_id: v.id.0,
            x:          v.position.x,
            y:          v.position.y,
            speed:      v.speed,
        }));
    }

    fn on_sim_end(&mut self, final_step: Step) {
        self.finished_at = Some(final_step);
    }
}
