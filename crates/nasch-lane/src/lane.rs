//! The toroidal lane: cell occupancy plus a vehicle → cell index.

use nasch_core::VehicleId;

use crate::{Cell, LaneError, LaneResult};

#[cfg(feature = "fx-hash")]
type PositionMap = rustc_hash::FxHashMap<VehicleId, Cell>;
#[cfg(not(feature = "fx-hash"))]
type PositionMap = std::collections::HashMap<VehicleId, Cell>;

/// A `width × height` grid that wraps in both axes.
///
/// Occupancy is stored twice: `cells` answers "who is here?" in O(1) for the
/// gap scan, `positions` answers "where is this vehicle?" for moves.  Both
/// are updated together; at most one vehicle occupies a cell.
#[derive(Debug, Clone)]
pub struct Lane {
    width:     u32,
    height:    u32,
    /// Row-major occupancy, length `width * height`.
    cells:     Vec<Option<VehicleId>>,
    positions: PositionMap,
}

impl Lane {
    /// Create an empty lane.
    pub fn new(width: u32, height: u32) -> LaneResult<Self> {
        if width == 0 || height == 0 {
            return Err(LaneError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells:     vec![None; width as usize * height as usize],
            positions: PositionMap::default(),
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// The lane always wraps.
    #[inline]
    pub fn is_torus(&self) -> bool {
        true
    }

    /// Number of vehicles currently on the lane.
    #[inline]
    pub fn occupied(&self) -> usize {
        self.positions.len()
    }

    // ── Coordinates ───────────────────────────────────────────────────────

    /// Wrap an arbitrary coordinate (negative or past the edge) onto the lane.
    #[inline]
    pub fn normalize(&self, x: i64, y: i64) -> Cell {
        Cell {
            x: x.rem_euclid(self.width as i64) as u32,
            y: y.rem_euclid(self.height as i64) as u32,
        }
    }

    /// `cell` shifted by `(dx, dy)`, wrapped.
    #[inline]
    pub fn offset(&self, cell: Cell, dx: i64, dy: i64) -> Cell {
        self.normalize(cell.x as i64 + dx, cell.y as i64 + dy)
    }

    /// Row-major index of the normalized `cell`.
    #[inline]
    pub fn index_of(&self, cell: Cell) -> usize {
        let c = self.offset(cell, 0, 0);
        c.y as usize * self.width as usize + c.x as usize
    }

    /// The cell at row-major `index`, wrapped if out of range.
    #[inline]
    pub fn cell_at(&self, index: usize) -> Cell {
        let index = index % self.capacity();
        Cell {
            x: (index % self.width as usize) as u32,
            y: (index / self.width as usize) as u32,
        }
    }

    /// Every cell in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.capacity()).map(|i| self.cell_at(i))
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// `true` iff no vehicle occupies the normalized `cell`.
    #[inline]
    pub fn is_empty(&self, cell: Cell) -> bool {
        self.cells[self.index_of(cell)].is_none()
    }

    /// The vehicle occupying the normalized `cell`, if any.
    #[inline]
    pub fn occupant(&self, cell: Cell) -> Option<VehicleId> {
        self.cells[self.index_of(cell)]
    }

    #[inline]
    pub fn position_of(&self, vehicle: VehicleId) -> Option<Cell> {
        self.positions.get(&vehicle).copied()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Put `vehicle` on the lane at `cell`.
    ///
    /// # Errors
    ///
    /// `OccupiedCell` if another vehicle is there, `AlreadyPlaced` if
    /// `vehicle` is already on the lane.
    pub fn place(&mut self, vehicle: VehicleId, cell: Cell) -> LaneResult<()> {
        if let Some(&at) = self.positions.get(&vehicle) {
            return Err(LaneError::AlreadyPlaced { vehicle, at });
        }
        let cell = self.offset(cell, 0, 0);
        let idx = self.index_of(cell);
        if let Some(occupant) = self.cells[idx] {
            return Err(LaneError::OccupiedCell { cell, occupant, incoming: vehicle });
        }
        self.cells[idx] = Some(vehicle);
        self.positions.insert(vehicle, cell);
        Ok(())
    }

    /// Vacate `vehicle`'s current cell and occupy `to`.
    ///
    /// Moving onto its own cell is a no-op.  The destination is checked even
    /// though the two-phase step guarantees it is free, so a broken gap check
    /// fails loudly instead of overwriting another vehicle.
    pub fn move_vehicle(&mut self, vehicle: VehicleId, to: Cell) -> LaneResult<()> {
        let from = self
            .positions
            .get(&vehicle)
            .copied()
            .ok_or(LaneError::NotPlaced(vehicle))?;
        let to = self.offset(to, 0, 0);
        if from == to {
            return Ok(());
        }

        let to_idx = self.index_of(to);
        if let Some(occupant) = self.cells[to_idx] {
            return Err(LaneError::OccupiedCell { cell: to, occupant, incoming: vehicle });
        }

        let from_idx = self.index_of(from);
        self.cells[from_idx] = None;
        self.cells[to_idx] = Some(vehicle);
        self.positions.insert(vehicle, to);
        Ok(())
    }
}
