//! Pieces module - the fixed catalog of piece shapes
//!
//! Eight shapes of four unit cubes each. The first five are the classic flat
//! tetrominoes; the last three step into the depth axis. Offsets are relative
//! to the piece pivot and are never mutated here.

use glam::IVec3;

use crate::types::{PIECE_CELLS, SHAPE_COUNT};

/// Cell offsets of a piece relative to its pivot
pub type PieceShape = [IVec3; PIECE_CELLS];

/// An immutable catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeDef {
    pub name: &'static str,
    /// Single-letter tag for compact displays
    pub letter: char,
    pub cells: PieceShape,
    /// 0xRRGGBB
    pub color: u32,
}

impl ShapeDef {
    /// Color split into (r, g, b)
    pub fn rgb(&self) -> (u8, u8, u8) {
        (
            ((self.color >> 16) & 0xff) as u8,
            ((self.color >> 8) & 0xff) as u8,
            (self.color & 0xff) as u8,
        )
    }
}

const fn v(x: i32, y: i32, z: i32) -> IVec3 {
    IVec3::new(x, y, z)
}

/// Catalog in selection order. Index 0 is the start shape after a reset.
pub const CATALOG: [ShapeDef; SHAPE_COUNT] = [
    ShapeDef {
        name: "L",
        letter: 'L',
        cells: [v(-1, -1, 0), v(0, -1, 0), v(-1, 0, 0), v(-1, 1, 0)],
        color: 0xff0000,
    },
    ShapeDef {
        name: "Stair",
        letter: 'S',
        cells: [v(-1, -1, 0), v(0, -1, 0), v(0, 0, 0), v(1, 0, 0)],
        color: 0xffff00,
    },
    ShapeDef {
        name: "Square",
        letter: 'O',
        cells: [v(-1, -1, 0), v(0, -1, 0), v(0, 0, 0), v(-1, 0, 0)],
        color: 0x00ffff,
    },
    ShapeDef {
        name: "I",
        letter: 'I',
        cells: [v(0, -2, 0), v(0, -1, 0), v(0, 0, 0), v(0, 1, 0)],
        color: 0xff0088,
    },
    ShapeDef {
        name: "T",
        letter: 'T',
        cells: [v(-1, -1, 0), v(0, -1, 0), v(0, 0, 0), v(1, -1, 0)],
        color: 0x8800ff,
    },
    // Depth-stepping forms
    ShapeDef {
        name: "Left screw",
        letter: 'l',
        cells: [v(0, 0, 0), v(0, -1, 0), v(-1, -1, 0), v(-1, -1, -1)],
        color: 0x8888ff,
    },
    ShapeDef {
        name: "Right screw",
        letter: 'r',
        cells: [v(-1, -1, -1), v(0, 0, 0), v(0, -1, 0), v(0, -1, -1)],
        color: 0x88ff88,
    },
    ShapeDef {
        name: "Corner",
        letter: 'c',
        cells: [v(0, 0, 0), v(0, -1, 0), v(-1, -1, 0), v(0, -1, -1)],
        color: 0x88ff00,
    },
];

/// Get a catalog entry.
///
/// Panics when `index` is outside the catalog: indices only come from the
/// random source (always bounded) or from code, never from the player.
pub fn shape(index: usize) -> &'static ShapeDef {
    assert!(
        index < SHAPE_COUNT,
        "shape index {index} out of catalog bounds (0..{SHAPE_COUNT})"
    );
    &CATALOG[index]
}

/// Index of the I piece (four vertically stacked cells)
pub const I_SHAPE: usize = 3;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_shape_has_four_distinct_cells() {
        for def in CATALOG.iter() {
            let unique: HashSet<_> = def.cells.iter().copied().collect();
            assert_eq!(unique.len(), PIECE_CELLS, "duplicate cell in {}", def.name);
        }
    }

    #[test]
    fn every_shape_is_face_connected() {
        for def in CATALOG.iter() {
            let mut reached = vec![def.cells[0]];
            let mut changed = true;
            while changed {
                changed = false;
                for c in def.cells {
                    if reached.contains(&c) {
                        continue;
                    }
                    if reached.iter().any(|r| (*r - c).abs().element_sum() == 1) {
                        reached.push(c);
                        changed = true;
                    }
                }
            }
            assert_eq!(reached.len(), PIECE_CELLS, "{} is not connected", def.name);
        }
    }

    #[test]
    fn only_the_last_three_use_depth() {
        for (i, def) in CATALOG.iter().enumerate() {
            let uses_depth = def.cells.iter().any(|c| c.z != 0);
            assert_eq!(uses_depth, i >= 5, "{}", def.name);
        }
    }

    #[test]
    fn i_shape_is_vertical_bar() {
        let def = shape(I_SHAPE);
        assert!(def.cells.iter().all(|c| c.x == 0 && c.z == 0));
    }

    #[test]
    fn rgb_splits_channels() {
        assert_eq!(shape(0).rgb(), (0xff, 0, 0));
        assert_eq!(shape(3).rgb(), (0xff, 0, 0x88));
    }

    #[test]
    #[should_panic(expected = "out of catalog bounds")]
    fn out_of_range_index_panics() {
        let _ = shape(SHAPE_COUNT);
    }
}
