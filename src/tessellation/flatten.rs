use tracing::{trace, warn};

use crate::error::Result;
use crate::geometry::Curve;
use crate::math::{lerp, Point3};

use super::FlatteningParams;

/// A parameter interval waiting to be tested for flatness.
#[derive(Debug, Clone, Copy)]
struct Span {
    t0: f64,
    t1: f64,
    p0: Point3,
    p1: Point3,
    depth: u32,
}

/// Converts a curve into a polyline by recursive bisection.
///
/// The domain is split into `segments` equal seed intervals. An interval is
/// accepted when the curve point at its parameter midpoint lies within
/// `distance` of its chord midpoint; otherwise it is bisected. Bisection is
/// driven by an explicit stack and stops at `max_depth` levels.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdaptiveFlattener {
    params: FlatteningParams,
}

impl AdaptiveFlattener {
    /// Creates a new flattener.
    #[must_use]
    pub fn new(params: FlatteningParams) -> Self {
        Self { params }
    }

    /// Returns the flattening parameters.
    #[must_use]
    pub fn params(&self) -> &FlatteningParams {
        &self.params
    }

    /// Flattens `curve`, returning the polyline vertices in parameter order.
    ///
    /// The first vertex is the curve's start point and the last its end point.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid or the curve fails to evaluate.
    pub fn flatten<C: Curve + ?Sized>(&self, curve: &C) -> Result<Vec<Point3>> {
        self.params.validate()?;
        let FlatteningParams {
            distance,
            segments,
            max_depth,
        } = self.params;

        let domain = curve.domain();
        let start_point = curve.start_point()?;
        let end_point = curve.end_point()?;
        let mut points = vec![start_point];
        if domain.span() <= 0.0 {
            return Ok(points);
        }

        #[allow(clippy::cast_precision_loss)]
        let step = domain.span() / segments as f64;
        let mut stack: Vec<Span> = Vec::new();
        let mut depth_limited = 0_usize;
        let mut t0 = domain.t_min;
        let mut p0 = start_point;

        for i in 1..=segments {
            // The last seed interval ends exactly on the curve's end point.
            let (t1, p1) = if i == segments {
                (domain.t_max, end_point)
            } else {
                #[allow(clippy::cast_precision_loss)]
                let t1 = domain.t_min + step * i as f64;
                (t1, curve.evaluate(t1)?)
            };

            stack.push(Span {
                t0,
                t1,
                p0,
                p1,
                depth: 0,
            });
            while let Some(span) = stack.pop() {
                let tm = (span.t0 + span.t1) * 0.5;
                let mid_point = curve.evaluate(tm)?;
                let chord_mid = lerp(&span.p0, &span.p1, 0.5);
                let flat = nalgebra::distance(&mid_point, &chord_mid) < distance;

                if flat || span.depth >= max_depth {
                    if !flat {
                        depth_limited += 1;
                    }
                    points.push(span.p1);
                } else {
                    // Right half first so the left half is popped next.
                    stack.push(Span {
                        t0: tm,
                        t1: span.t1,
                        p0: mid_point,
                        p1: span.p1,
                        depth: span.depth + 1,
                    });
                    stack.push(Span {
                        t0: span.t0,
                        t1: tm,
                        p0: span.p0,
                        p1: mid_point,
                        depth: span.depth + 1,
                    });
                }
            }

            t0 = t1;
            p0 = p1;
        }

        if depth_limited > 0 {
            warn!(
                distance,
                max_depth,
                intervals = depth_limited,
                "flattening stopped at maximum subdivision depth before reaching tolerance"
            );
        }
        trace!(vertices = points.len(), distance, segments, "curve flattened");
        Ok(points)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Arc, CubicBezier};
    use crate::math::Matrix4;
    use crate::tessellation::MAX_SUBDIVISION_DEPTH;
    use approx::assert_relative_eq;

    fn hump() -> CubicBezier {
        CubicBezier::new([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 3.0, 0.0),
            Point3::new(3.0, 3.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
        ])
    }

    fn straight_line() -> CubicBezier {
        CubicBezier::new([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 2.0, 3.0),
            Point3::new(2.0, 4.0, 6.0),
            Point3::new(3.0, 6.0, 9.0),
        ])
    }

    /// Largest distance from sampled curve points to the polyline.
    fn max_deviation(curve: &CubicBezier, polyline: &[Point3]) -> f64 {
        let samples = curve.approximate(2000).unwrap();
        samples
            .iter()
            .map(|p| {
                polyline
                    .windows(2)
                    .map(|seg| distance_to_segment(p, &seg[0], &seg[1]))
                    .fold(f64::INFINITY, f64::min)
            })
            .fold(0.0, f64::max)
    }

    fn distance_to_segment(p: &Point3, a: &Point3, b: &Point3) -> f64 {
        let ab = b - a;
        let t = ((p - a).dot(&ab) / ab.norm_squared()).clamp(0.0, 1.0);
        (p - (a + ab * t)).norm()
    }

    #[test]
    fn end_points_are_exact() {
        let c = hump();
        let points = c.flattening(0.01, 4).unwrap();
        assert_eq!(points[0], c.start_point());
        assert_eq!(*points.last().unwrap(), c.end_point());
    }

    #[test]
    fn straight_line_needs_no_subdivision() {
        let c = straight_line();
        for d in [1e-6, 0.01, 1.0] {
            let points = c.flattening(d, 1).unwrap();
            assert_eq!(points, vec![c.start_point(), c.end_point()]);
        }
        // Every seed interval boundary is kept.
        assert_eq!(c.flattening(0.01, 4).unwrap().len(), 5);
    }

    #[test]
    fn smaller_distance_never_reduces_vertex_count() {
        let c = hump();
        let mut previous = 0;
        for d in [1.0, 0.5, 0.1, 0.05, 0.01, 0.001, 0.0001] {
            let count = c.flattening(d, 4).unwrap().len();
            assert!(count >= previous, "distance {d}: {count} < {previous}");
            previous = count;
        }
    }

    #[test]
    fn polyline_stays_within_tolerance() {
        let c = hump();
        let d = 0.01;
        let points = c.flattening(d, 4).unwrap();
        assert!(points.len() > 5);
        assert!(max_deviation(&c, &points) < 2.0 * d);
    }

    #[test]
    fn vertices_follow_parameter_order() {
        let c = hump();
        let points = c.flattening(0.001, 4).unwrap();
        assert!(points.windows(2).all(|w| w[1].x > w[0].x));
    }

    #[test]
    fn invalid_arguments() {
        let c = hump();
        assert!(c.flattening(0.01, 0).is_err());
        assert!(c.flattening(f64::NAN, 4).is_err());
    }

    #[test]
    fn zero_distance_stops_at_depth_cap() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let c = hump();
        let depth = usize::try_from(MAX_SUBDIVISION_DEPTH).unwrap();
        let points = c.flattening(0.0, 4).unwrap();
        assert_eq!(points.len(), 4 * (1 << depth) + 1);
        assert_eq!(points[0], c.start_point());
        assert_eq!(*points.last().unwrap(), c.end_point());
    }

    #[test]
    fn negative_distance_stops_at_depth_cap() {
        let c = hump();
        let params = FlatteningParams::default()
            .with_distance(-1.0)
            .with_segments(3)
            .with_max_depth(5);
        let flattener = AdaptiveFlattener::new(params);
        assert_eq!(flattener.params().max_depth, 5);
        let points = flattener.flatten(&c).unwrap();
        assert_eq!(points.len(), 3 * 32 + 1);
        assert_eq!(*points.last().unwrap(), c.end_point());
    }

    #[test]
    fn default_flattener_uses_default_params() {
        assert_eq!(*AdaptiveFlattener::default().params(), FlatteningParams::default());
    }

    #[test]
    fn depth_cap_bounds_output() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let c = hump().transform(&Matrix4::new_scaling(1e6));
        let params = FlatteningParams::default()
            .with_distance(1e-12)
            .with_segments(2)
            .with_max_depth(6);
        let points = AdaptiveFlattener::new(params).flatten(&c).unwrap();
        // A full binary tree of depth 6 under each of the 2 seed intervals.
        assert_eq!(points.len(), 2 * 64 + 1);
        assert_eq!(*points.last().unwrap(), c.end_point());
    }

    #[test]
    fn flattens_arcs_directly() {
        let arc = Arc::new(Point3::origin(), 10.0, 0.0, 180.0).unwrap();
        let points = AdaptiveFlattener::new(FlatteningParams::default().with_distance(0.01))
            .flatten(&arc)
            .unwrap();
        assert!(points.len() > 10);
        for p in &points {
            assert_relative_eq!(p.coords.norm(), 10.0, epsilon = 1e-9);
        }
        assert_relative_eq!(points[0].x, 10.0, epsilon = 1e-12);
        assert_relative_eq!(points.last().unwrap().x, -10.0, epsilon = 1e-12);
    }
}
