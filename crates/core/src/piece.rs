//! Piece module - the active piece's discrete transform
//!
//! A piece is four cell offsets around an integer pivot. Rotation always
//! works on the current offsets (there is no stored orientation), so it can
//! never drift: each quarter turn lands back on the integer grid.

use std::f32::consts::FRAC_PI_2;

use glam::{IVec3, Mat3, Vec3};

use crate::pieces::{shape, PieceShape};

/// Axis-aligned extents of a piece in field space
///
/// Lower bounds are inclusive, upper bounds exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: i32,
    pub right: i32,
    pub bottom: i32,
    pub top: i32,
    pub front: i32,
    pub back: i32,
}

/// Falling piece state: offsets after rotation plus the pivot position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    cells: PieceShape,
    position: IVec3,
    shape_index: usize,
}

impl Piece {
    /// Create a piece from a catalog entry with its pivot at the origin
    pub fn new(shape_index: usize) -> Self {
        Self {
            cells: shape(shape_index).cells,
            position: IVec3::ZERO,
            shape_index,
        }
    }

    /// Replace the offsets with the catalog entry at `index`
    pub fn set_shape(&mut self, index: usize) {
        self.cells = shape(index).cells;
        self.shape_index = index;
    }

    /// Overwrite offsets and position from another piece
    pub fn copy_from(&mut self, other: &Piece) {
        *self = *other;
    }

    pub fn shape_index(&self) -> usize {
        self.shape_index
    }

    /// Offsets relative to the pivot
    pub fn cells(&self) -> &PieceShape {
        &self.cells
    }

    pub fn position(&self) -> IVec3 {
        self.position
    }

    pub fn set_position(&mut self, position: IVec3) {
        self.position = position;
    }

    pub fn translate(&mut self, delta: IVec3) {
        self.position += delta;
    }

    /// Occupied cells in field space
    pub fn world_cells(&self) -> [IVec3; 4] {
        self.cells.map(|c| c + self.position)
    }

    /// Rotate every offset a quarter turn around a signed unit axis.
    ///
    /// The turn pivots on the cell corner (offsets shifted by half a cell),
    /// so cube corners rather than cube centers stay on the lattice. Each
    /// coordinate is then rounded back to an integer.
    pub fn rotate_around_axis(&mut self, axis: IVec3) {
        debug_assert_eq!(
            axis.abs().element_sum(),
            1,
            "rotation axis must be a unit cardinal, got {axis}"
        );
        let rot = Mat3::from_axis_angle(axis.as_vec3(), FRAC_PI_2);
        let half = Vec3::splat(0.5);
        for cell in self.cells.iter_mut() {
            let turned = rot * (cell.as_vec3() + half) - half;
            *cell = turned.round().as_ivec3();
        }
    }

    /// Extents of the four world cells
    pub fn bounding_box(&self) -> BoundingBox {
        let first = self.cells[0];
        let mut min = first;
        let mut max = first + IVec3::ONE;
        for c in self.cells.iter().skip(1) {
            min = min.min(*c);
            max = max.max(*c + IVec3::ONE);
        }
        let min = min + self.position;
        let max = max + self.position;
        BoundingBox {
            left: min.x,
            right: max.x,
            bottom: min.y,
            top: max.y,
            front: min.z,
            back: max.z,
        }
    }
}

impl Default for Piece {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Quarter turn of a direction vector around a signed unit axis, no pivot shift.
pub(crate) fn turn_direction(dir: IVec3, axis: IVec3, angle: f32) -> IVec3 {
    let rot = Mat3::from_axis_angle(axis.as_vec3(), angle);
    (rot * dir.as_vec3()).round().as_ivec3()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::CATALOG;
    use crate::types::SHAPE_COUNT;

    const AXES: [IVec3; 6] = [
        IVec3::X,
        IVec3::NEG_X,
        IVec3::Y,
        IVec3::NEG_Y,
        IVec3::Z,
        IVec3::NEG_Z,
    ];

    #[test]
    fn four_quarter_turns_are_identity() {
        for index in 0..SHAPE_COUNT {
            for axis in AXES {
                let mut p = Piece::new(index);
                let original = *p.cells();
                for _ in 0..4 {
                    p.rotate_around_axis(axis);
                }
                assert_eq!(*p.cells(), original, "shape {index} axis {axis}");
            }
        }
    }

    #[test]
    fn opposite_axes_undo_each_other() {
        for index in 0..SHAPE_COUNT {
            let mut p = Piece::new(index);
            let original = *p.cells();
            p.rotate_around_axis(IVec3::Z);
            p.rotate_around_axis(IVec3::NEG_Z);
            assert_eq!(*p.cells(), original);
        }
    }

    #[test]
    fn rotation_pivots_on_cell_corner() {
        // A single offset at the origin occupies the cube [0,1]^3; a quarter
        // turn about +Y about the corner-centered pivot maps it to x=0,z=-1.
        let mut p = Piece::new(0);
        p.cells = [IVec3::ZERO; 4];
        p.rotate_around_axis(IVec3::Y);
        assert_eq!(p.cells[0], IVec3::new(0, 0, -1));
    }

    #[test]
    fn rotation_about_y_keeps_heights() {
        let mut p = Piece::new(0);
        let before: Vec<i32> = p.cells().iter().map(|c| c.y).collect();
        p.rotate_around_axis(IVec3::Y);
        let after: Vec<i32> = p.cells().iter().map(|c| c.y).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn rotation_does_not_move_pivot() {
        let mut p = Piece::new(4);
        p.set_position(IVec3::new(2, 14, 2));
        p.rotate_around_axis(IVec3::X);
        assert_eq!(p.position(), IVec3::new(2, 14, 2));
    }

    #[test]
    fn bounding_box_of_i_piece() {
        let mut p = Piece::new(3);
        p.set_position(IVec3::new(2, 14, 2));
        let bb = p.bounding_box();
        assert_eq!((bb.left, bb.right), (2, 3));
        assert_eq!((bb.bottom, bb.top), (12, 16));
        assert_eq!((bb.front, bb.back), (2, 3));
    }

    #[test]
    fn world_cells_add_position() {
        let mut p = Piece::new(1);
        p.translate(IVec3::new(1, 2, 3));
        let world = p.world_cells();
        for (w, c) in world.iter().zip(CATALOG[1].cells.iter()) {
            assert_eq!(*w, *c + IVec3::new(1, 2, 3));
        }
    }

    #[test]
    fn copy_from_is_deep() {
        let mut a = Piece::new(2);
        let mut b = Piece::new(5);
        b.translate(IVec3::new(1, 1, 1));
        a.copy_from(&b);
        b.rotate_around_axis(IVec3::Y);
        assert_ne!(a.cells(), b.cells());
        assert_eq!(a.position(), IVec3::new(1, 1, 1));
        assert_eq!(a.shape_index(), 5);
    }

    #[test]
    fn turn_direction_quarter_about_y() {
        let back = IVec3::new(0, 0, 1);
        assert_eq!(turn_direction(back, IVec3::Y, FRAC_PI_2), IVec3::new(1, 0, 0));
        assert_eq!(
            turn_direction(back, IVec3::Y, std::f32::consts::PI),
            IVec3::new(0, 0, -1)
        );
    }
}
