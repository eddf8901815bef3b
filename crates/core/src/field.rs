//! Field module - the 3D occupancy grid
//!
//! Cells are stored in a flat vector indexed `x + y*W + z*W*H` (x fastest,
//! then y, then z). Y = 0 is the floor. Only occupancy is tracked; colors of
//! settled cubes belong to the presentation side.

use glam::IVec3;
use log::debug;

use crate::piece::Piece;
use crate::types::Extent;

/// The play field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    extent: Extent,
    cells: Vec<bool>,
}

impl Field {
    /// Create an empty field. Panics if any dimension is zero.
    pub fn new(extent: Extent) -> Self {
        assert!(extent.is_valid(), "field extent must be non-zero: {extent:?}");
        Self {
            extent,
            cells: vec![false; extent.volume()],
        }
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn width(&self) -> i32 {
        self.extent.width as i32
    }

    pub fn height(&self) -> i32 {
        self.extent.height as i32
    }

    pub fn depth(&self) -> i32 {
        self.extent.depth as i32
    }

    /// Linear index of a cell, `None` when outside the grid
    #[inline(always)]
    pub fn index(&self, cell: IVec3) -> Option<usize> {
        if !self.extent.contains(cell) {
            return None;
        }
        let w = self.extent.width as usize;
        let h = self.extent.height as usize;
        Some(cell.x as usize + cell.y as usize * w + cell.z as usize * w * h)
    }

    /// Inverse of [`Field::index`]
    pub fn cell_at(&self, index: usize) -> IVec3 {
        let w = self.extent.width as usize;
        let wh = w * self.extent.height as usize;
        IVec3::new(
            (index % w) as i32,
            (index % wh / w) as i32,
            (index / wh) as i32,
        )
    }

    /// Occupancy of a cell; out-of-range cells read as empty
    pub fn is_occupied(&self, cell: IVec3) -> bool {
        self.index(cell).map(|i| self.cells[i]).unwrap_or(false)
    }

    /// Set occupancy of a cell. Returns false if out of range.
    pub fn set(&mut self, cell: IVec3, occupied: bool) -> bool {
        match self.index(cell) {
            Some(i) => {
                self.cells[i] = occupied;
                true
            }
            None => false,
        }
    }

    /// True if any of the piece's cells leaves the X/Z bounds, goes below
    /// the floor, or overlaps an occupied cell.
    ///
    /// Cells at or above the top are allowed so pieces can spawn and turn
    /// over the field; running out of room is detected by the caller.
    pub fn collides(&self, piece: &Piece) -> bool {
        piece.world_cells().iter().any(|&p| {
            p.x < 0
                || p.x >= self.width()
                || p.z < 0
                || p.z >= self.depth()
                || p.y < 0
                || (p.y < self.height() && self.is_occupied(p))
        })
    }

    /// Check if every (x, z) cell of layer `y` is occupied
    pub fn is_layer_full(&self, y: i32) -> bool {
        if y < 0 || y >= self.height() {
            return false;
        }
        (0..self.depth()).all(|z| (0..self.width()).all(|x| self.is_occupied(IVec3::new(x, y, z))))
    }

    /// Settle a piece into the grid and remove full layers.
    ///
    /// Layers are scanned from the floor up. After a full layer is removed
    /// everything above drops by one, so the same `y` is tested again before
    /// moving on. Returns the number of layers removed.
    pub fn place(&mut self, piece: &Piece) -> u32 {
        for cell in piece.world_cells() {
            if !self.set(cell, true) {
                debug!("skipping out-of-range cell {cell} while placing");
            }
        }

        let mut cleared = 0;
        let mut y = 0;
        while y < self.height() {
            if self.is_layer_full(y) {
                cleared += 1;
                self.collapse_onto(y);
            } else {
                y += 1;
            }
        }

        if cleared > 0 {
            debug!("cleared {cleared} layer(s)");
        }
        cleared
    }

    /// Shift every layer above `y` down by one and empty the top layer.
    fn collapse_onto(&mut self, y: i32) {
        let w = self.extent.width as usize;
        let slab = w * self.extent.height as usize;
        let top = self.height() as usize - 1;

        for z in 0..self.extent.depth as usize {
            let base = z * slab;
            let dst = base + y as usize * w;
            // Rows y+1..H move to y..H-1 within this z slab.
            self.cells.copy_within(dst + w..base + slab, dst);
            let top_start = base + top * w;
            self.cells[top_start..top_start + w].fill(false);
        }
    }

    /// Clear all cells
    pub fn reset(&mut self) {
        self.cells.fill(false);
    }

    /// Flat occupancy, indexed as [`Field::index`]
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }

    /// One above the highest occupied cell of column (x, z); 0 when empty
    pub fn column_height(&self, x: i32, z: i32) -> i32 {
        (0..self.height())
            .rev()
            .find(|&y| self.is_occupied(IVec3::new(x, y, z)))
            .map(|y| y + 1)
            .unwrap_or(0)
    }

    /// Fill a whole layer (for tests and benches)
    pub fn fill_layer(&mut self, y: i32) {
        for z in 0..self.depth() {
            for x in 0..self.width() {
                self.set(IVec3::new(x, y, z), true);
            }
        }
    }
}
