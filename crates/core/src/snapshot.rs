//! Snapshot module - read-only copies of the game for presentation
//!
//! The presentation side never holds references into the simulation. Each
//! frame it fills a reusable [`GameSnapshot`] via
//! [`GameState::snapshot_into`](crate::GameState::snapshot_into) and draws
//! from that.

use glam::IVec3;

use crate::piece::Piece;
use crate::types::{Extent, PIECE_CELLS};

/// The falling piece as seen by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActiveSnapshot {
    pub shape_index: usize,
    pub position: IVec3,
    /// World-space cells (may lie above the field top)
    pub cells: [IVec3; PIECE_CELLS],
}

impl From<&Piece> for ActiveSnapshot {
    fn from(piece: &Piece) -> Self {
        Self {
            shape_index: piece.shape_index(),
            position: piece.position(),
            cells: piece.world_cells(),
        }
    }
}

/// Full observable state after a step
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameSnapshot {
    pub extent: Extent,
    /// Field occupancy, indexed `x + y*W + z*W*H`
    pub occupancy: Vec<bool>,
    pub active: ActiveSnapshot,
    pub score: u32,
    pub rows_cleared: u32,
    pub pieces_placed: u32,
    /// Current descent velocity in cells per second
    pub velocity: f32,
    pub paused: bool,
}

impl GameSnapshot {
    /// Occupancy of a field cell; anything outside reads as empty
    pub fn is_occupied(&self, cell: IVec3) -> bool {
        if !self.extent.contains(cell) {
            return false;
        }
        let w = self.extent.width as usize;
        let h = self.extent.height as usize;
        let i = cell.x as usize + cell.y as usize * w + cell.z as usize * w * h;
        self.occupancy.get(i).copied().unwrap_or(false)
    }

    /// Indices whose occupancy differs from `previous`, with the new value.
    ///
    /// A presenter keeping one visual per settled cube uses this to add and
    /// remove only what changed. Snapshots of different extents compare every
    /// cell as changed.
    pub fn changed_cells<'a>(
        &'a self,
        previous: &'a GameSnapshot,
    ) -> impl Iterator<Item = (usize, bool)> + 'a {
        let same_shape = previous.extent == self.extent;
        self.occupancy
            .iter()
            .enumerate()
            .filter(move |(i, now)| {
                !same_shape || previous.occupancy.get(*i).copied() != Some(**now)
            })
            .map(|(i, now)| (i, *now))
    }
}
