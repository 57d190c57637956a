//! Angle utilities shared by the arc and ellipse converters.
//!
//! All functions take the period explicitly (`360.0` for degrees, `TAU` for
//! radians) so both paths wrap angles the same way.

/// Angles closer than this are treated as equal.
pub const ANGLE_TOLERANCE: f64 = 1e-9;

/// Wraps `angle` into `[0, full_turn)`.
#[must_use]
pub fn normalize_angle(angle: f64, full_turn: f64) -> f64 {
    let wrapped = angle.rem_euclid(full_turn);
    // rem_euclid can round up to exactly full_turn for tiny negative inputs.
    if wrapped >= full_turn || (full_turn - wrapped) < ANGLE_TOLERANCE {
        0.0
    } else {
        wrapped
    }
}

/// Counter-clockwise span from `start` to `end`.
///
/// - Equal inputs are a degenerate arc with span `0`.
/// - Inputs that coincide after wrapping (e.g. `0` and `360`) span a full turn.
/// - Otherwise the end angle is lifted by a full turn when it lies at or before
///   the start angle, so `350 -> 10` spans `20`.
#[must_use]
pub fn arc_angle_span(start: f64, end: f64, full_turn: f64) -> f64 {
    if (end - start).abs() < ANGLE_TOLERANCE {
        return 0.0;
    }
    let start = normalize_angle(start, full_turn);
    let mut end = normalize_angle(end, full_turn);
    if (end - start).abs() < ANGLE_TOLERANCE {
        return full_turn;
    }
    if end < start {
        end += full_turn;
    }
    end - start
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{PI, TAU};

    #[test]
    fn normalize_degrees() {
        assert_abs_diff_eq!(normalize_angle(370.0, 360.0), 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_angle(-90.0, 360.0), 270.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_angle(360.0, 360.0), 0.0);
        assert_abs_diff_eq!(normalize_angle(-1e-14, 360.0), 0.0);
    }

    #[test]
    fn normalize_radians() {
        assert_abs_diff_eq!(normalize_angle(3.0 * PI, TAU), PI, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_span() {
        assert_abs_diff_eq!(arc_angle_span(0.0, 0.0, 360.0), 0.0);
        assert_abs_diff_eq!(arc_angle_span(45.0, 45.0, 360.0), 0.0);
    }

    #[test]
    fn full_turn_span() {
        assert_abs_diff_eq!(arc_angle_span(0.0, 360.0, 360.0), 360.0);
        assert_abs_diff_eq!(arc_angle_span(90.0, 450.0, 360.0), 360.0);
    }

    #[test]
    fn wraparound_span() {
        assert_abs_diff_eq!(arc_angle_span(350.0, 10.0, 360.0), 20.0, epsilon = 1e-12);
        assert_abs_diff_eq!(arc_angle_span(90.0, 0.0, 360.0), 270.0, epsilon = 1e-12);
        assert_abs_diff_eq!(arc_angle_span(0.0, 90.0, 360.0), 90.0, epsilon = 1e-12);
    }
}
