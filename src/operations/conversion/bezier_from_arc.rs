use tracing::debug;

use crate::error::{GeometryError, Result};
use crate::math::angle::{arc_angle_span, normalize_angle, ANGLE_TOLERANCE};
use crate::math::{Point3, Vector3};

use super::{ArcParameters, BezierCurves};

/// Approximates a circular arc in the XY plane with cubic Bezier curves.
#[derive(Debug, Clone, Copy)]
pub struct BezierFromArc {
    center: Point3,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    segments: usize,
}

impl BezierFromArc {
    /// Creates a new `BezierFromArc` operation.
    ///
    /// Angles are in degrees, counter-clockwise from the +X axis.
    #[must_use]
    pub fn new(
        center: Point3,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        segments: usize,
    ) -> Self {
        Self {
            center,
            radius,
            start_angle,
            end_angle,
            segments,
        }
    }

    /// Executes the conversion, returning the curves in angular order.
    ///
    /// Equal start and end angles describe a zero-length arc and yield no
    /// curves; angles equal only after wrapping (e.g. `0` and `360`) describe
    /// a full circle.
    ///
    /// # Errors
    ///
    /// Returns an error if `segments` is zero.
    pub fn execute(&self) -> Result<BezierCurves> {
        if self.segments == 0 {
            return Err(GeometryError::InvalidSegmentCount(self.segments).into());
        }
        let span = arc_angle_span(self.start_angle, self.end_angle, 360.0);
        if span < ANGLE_TOLERANCE {
            return Ok(BezierCurves::empty());
        }

        let start = normalize_angle(self.start_angle, 360.0).to_radians();
        let end = start + span.to_radians();
        let params = ArcParameters::new(start, end, self.segments)?;
        debug!(
            radius = self.radius,
            span,
            arcs = params.arc_count(),
            "converting arc to Bezier curves"
        );
        Ok(BezierCurves::new(
            params,
            self.center,
            Vector3::x() * self.radius,
            Vector3::y() * self.radius,
        ))
    }
}

/// Cubic Bezier curves approximating the arc around `center` with `radius`
/// from `start_angle` to `end_angle` (degrees, counter-clockwise).
///
/// # Errors
///
/// Returns an error if `segments` is zero.
pub fn bezier_from_arc(
    center: Point3,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    segments: usize,
) -> Result<BezierCurves> {
    BezierFromArc::new(center, radius, start_angle, end_angle, segments).execute()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{have_g1_continuity, Arc, CubicBezier, Curve};
    use approx::assert_abs_diff_eq;

    #[test]
    fn quarter_circle() {
        let curves: Vec<CubicBezier> = bezier_from_arc(Point3::origin(), 1.0, 0.0, 90.0, 1)
            .unwrap()
            .collect();
        assert_eq!(curves.len(), 1);
        assert_abs_diff_eq!(curves[0].start_point(), Point3::new(1.0, 0.0, 0.0), epsilon = 1e-9);
        assert_abs_diff_eq!(curves[0].end_point(), Point3::new(0.0, 1.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn zero_length_arc_is_empty() {
        let mut curves = bezier_from_arc(Point3::origin(), 1.0, 0.0, 0.0, 1).unwrap();
        assert_eq!(curves.len(), 0);
        assert!(curves.next().is_none());
    }

    #[test]
    fn full_circle_is_closed_and_smooth() {
        let center = Point3::new(2.0, -1.0, 3.0);
        let curves: Vec<_> = bezier_from_arc(center, 5.0, 0.0, 360.0, 1).unwrap().collect();
        assert_eq!(curves.len(), 4);
        assert_abs_diff_eq!(curves[0].start_point(), curves[3].end_point(), epsilon = 1e-9);
        for pair in curves.windows(2) {
            assert!(have_g1_continuity(&pair[0], &pair[1], 1e-9));
        }
        for c in &curves {
            assert_abs_diff_eq!(c.start_point().z, 3.0);
        }
    }

    #[test]
    fn wraparound_arc() {
        let curves: Vec<_> = bezier_from_arc(Point3::origin(), 2.0, 350.0, 10.0, 1)
            .unwrap()
            .collect();
        assert_eq!(curves.len(), 1);
        let (sin_start, cos_start) = 350f64.to_radians().sin_cos();
        let (sin_end, cos_end) = 10f64.to_radians().sin_cos();
        let start = Point3::new(2.0 * cos_start, 2.0 * sin_start, 0.0);
        let end = Point3::new(2.0 * cos_end, 2.0 * sin_end, 0.0);
        assert_abs_diff_eq!(curves[0].start_point(), start, epsilon = 1e-9);
        assert_abs_diff_eq!(curves[0].end_point(), end, epsilon = 1e-9);
    }

    #[test]
    fn curve_points_stay_near_circle() {
        let center = Point3::new(10.0, 10.0, 0.0);
        let radius = 5.0;
        for curve in bezier_from_arc(center, radius, 30.0, 300.0, 1).unwrap() {
            for i in 0..=20 {
                let p = curve.point(f64::from(i) / 20.0).unwrap();
                let radial_error = ((p - center).norm() - radius).abs();
                assert!(radial_error < radius * 3e-4, "radial error {radial_error}");
            }
        }
    }

    #[test]
    fn lazy_consumption_can_stop_early() {
        let mut curves = bezier_from_arc(Point3::origin(), 1.0, 0.0, 360.0, 8).unwrap();
        assert_eq!(curves.len(), 8);
        let first = curves.next().unwrap();
        assert_abs_diff_eq!(first.start_point(), Point3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
        assert_eq!(curves.len(), 7);
    }

    #[test]
    fn arc_entity_conversion_matches_arc_end_points() {
        let arc = Arc::new(Point3::new(1.0, 2.0, 0.0), 3.0, 45.0, 200.0).unwrap();
        let curves: Vec<_> = arc.to_bezier(1).unwrap().collect();
        assert_eq!(curves.len(), 2);
        assert_abs_diff_eq!(
            curves[0].start_point(),
            Curve::start_point(&arc).unwrap(),
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            curves[1].end_point(),
            Curve::end_point(&arc).unwrap(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn zero_segments_is_an_error() {
        assert!(bezier_from_arc(Point3::origin(), 1.0, 0.0, 90.0, 0).is_err());
    }
}
