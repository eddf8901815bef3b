//! Scoring module - reward and speed-up rules for a placement
//!
//! Clearing `r` layers at once scores `r²`, so multi-layer clears are worth
//! more than the same layers cleared one at a time. Every cleared layer also
//! makes gravity faster.

/// Points for clearing `rows` layers in one placement
pub fn placement_score(rows: u32) -> u32 {
    rows * rows
}

/// New descent velocity after clearing `rows` layers.
///
/// Velocity is negative (downward); its magnitude grows by `speedup_per_row`
/// for each layer.
pub fn accelerated_velocity(velocity: f32, rows: u32, speedup_per_row: f32) -> f32 {
    velocity - speedup_per_row * rows as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_is_square_of_rows() {
        assert_eq!(placement_score(0), 0);
        assert_eq!(placement_score(1), 1);
        assert_eq!(placement_score(2), 4);
        assert_eq!(placement_score(3), 9);
        assert_eq!(placement_score(4), 16);
    }

    #[test]
    fn test_multi_clear_beats_singles() {
        assert!(placement_score(3) > 3 * placement_score(1));
    }

    #[test]
    fn test_velocity_grows_downward() {
        let v = accelerated_velocity(-1.0, 2, 0.1);
        assert!((v - -1.2).abs() < 1e-6);
        assert_eq!(accelerated_velocity(-1.0, 0, 0.1), -1.0);
    }
}
