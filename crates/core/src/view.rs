//! View module - camera-relative control directions
//!
//! The player turns the field freely, so "left" and "forward" depend on where
//! the camera looks. These functions snap the camera's forward direction to
//! one of the four horizontal field axes. They take plain vectors and need no
//! rendering context.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{IVec3, Vec3};

use crate::piece::turn_direction;
use crate::types::CARDINALS;

/// Field-space unit vectors for the four translation actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlFrame {
    pub forward: IVec3,
    pub backward: IVec3,
    pub left: IVec3,
    pub right: IVec3,
}

impl ControlFrame {
    /// Derive all four directions from the camera's forward vector
    pub fn from_view(view_forward: Vec3) -> Self {
        let backward = snap_backward(view_forward);
        Self {
            forward: turn_direction(backward, IVec3::Y, PI),
            backward,
            left: turn_direction(backward, IVec3::Y, FRAC_PI_2),
            right: turn_direction(backward, IVec3::Y, -FRAC_PI_2),
        }
    }
}

/// Snap a view direction to the horizontal axis pointing back at the camera.
///
/// The vertical component is dropped and the result compared against
/// [`CARDINALS`] in order; only a strictly larger dot product replaces the
/// current best, so ties go to the earlier axis. A vertical or zero vector
/// behaves like the first axis.
pub fn snap_backward(view_forward: Vec3) -> IVec3 {
    let flat = Vec3::new(view_forward.x, 0.0, view_forward.z).normalize_or_zero();

    let mut best = 0;
    let mut best_dot = flat.dot(CARDINALS[0].as_vec3());
    for (i, c) in CARDINALS.iter().enumerate().skip(1) {
        let d = flat.dot(c.as_vec3());
        if d > best_dot {
            best_dot = d;
            best = i;
        }
    }
    -CARDINALS[best]
}

/// Forward vector of a camera orbiting the field at `yaw` radians.
///
/// Yaw 0 looks down -Z; positive yaw turns toward +X.
pub fn view_forward_from_yaw(yaw: f32) -> Vec3 {
    Vec3::new(yaw.sin(), 0.0, -yaw.cos())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snaps_to_nearest_axis_and_negates() {
        assert_eq!(snap_backward(Vec3::new(0.0, 0.0, -1.0)), IVec3::new(0, 0, 1));
        assert_eq!(snap_backward(Vec3::new(0.9, 0.0, -0.2)), IVec3::new(-1, 0, 0));
        assert_eq!(snap_backward(Vec3::new(0.1, 0.0, 1.0)), IVec3::new(0, 0, -1));
        assert_eq!(snap_backward(Vec3::new(-1.0, 0.0, 0.3)), IVec3::new(1, 0, 0));
    }

    #[test]
    fn vertical_component_is_ignored() {
        assert_eq!(
            snap_backward(Vec3::new(0.2, -5.0, -0.9)),
            snap_backward(Vec3::new(0.2, 0.0, -0.9))
        );
    }

    #[test]
    fn exact_diagonal_tie_keeps_first_axis() {
        // Equidistant between -Z (index 0) and +X (index 1).
        assert_eq!(snap_backward(Vec3::new(1.0, 0.0, -1.0)), IVec3::new(0, 0, 1));
    }

    #[test]
    fn straight_down_falls_back_to_first_axis() {
        assert_eq!(snap_backward(Vec3::new(0.0, -1.0, 0.0)), -CARDINALS[0]);
    }

    #[test]
    fn control_frame_for_default_view() {
        let f = ControlFrame::from_view(Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(f.backward, IVec3::new(0, 0, 1));
        assert_eq!(f.forward, IVec3::new(0, 0, -1));
        assert_eq!(f.left, IVec3::new(1, 0, 0));
        assert_eq!(f.right, IVec3::new(-1, 0, 0));
    }

    #[test]
    fn control_frame_directions_are_distinct_units() {
        for step in 0..16 {
            let yaw = step as f32 * PI / 8.0 + 0.01;
            let f = ControlFrame::from_view(view_forward_from_yaw(yaw));
            let dirs = [f.forward, f.backward, f.left, f.right];
            for (i, a) in dirs.iter().enumerate() {
                assert_eq!(a.abs().element_sum(), 1);
                assert_eq!(a.y, 0);
                for b in dirs.iter().skip(i + 1) {
                    assert_ne!(a, b);
                }
            }
            assert_eq!(f.forward, -f.backward);
            assert_eq!(f.left, -f.right);
        }
    }

    #[test]
    fn yaw_zero_looks_down_negative_z() {
        let v = view_forward_from_yaw(0.0);
        assert!((v - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
    }
}
