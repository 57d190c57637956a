use crate::error::{GeometryError, Result};
use crate::math::{is_close, lerp, transform_point, Matrix4, Point3, Vector3, TOLERANCE};
use crate::tessellation::{self, AdaptiveFlattener, FlatteningParams};

use super::{Curve, CurveDomain};

/// Default tolerance for [`have_g1_continuity`].
pub const DEFAULT_G1_TOLERANCE: f64 = 1e-4;

/// A cubic Bezier curve defined by four control points.
///
/// `B(t) = (1-t)^3 P0 + 3(1-t)^2 t P1 + 3(1-t) t^2 P2 + t^3 P3` for `t` in `[0, 1]`.
///
/// `P0` and `P3` are the end points, `P1` and `P2` shape the end tangents.
/// The curve is immutable; [`reverse`](Self::reverse), [`transform`](Self::transform)
/// and [`split`](Self::split) return new curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    control_points: [Point3; 4],
}

impl CubicBezier {
    /// Creates a curve from exactly four control points.
    #[must_use]
    pub fn new(control_points: [Point3; 4]) -> Self {
        Self { control_points }
    }

    /// Creates a curve from any sequence of point-like values.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidControlPoints`] if the sequence does not
    /// hold exactly four points.
    pub fn from_points<I, P>(points: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<Point3>,
    {
        let points: Vec<Point3> = points.into_iter().map(Into::into).collect();
        Self::try_from(points.as_slice())
    }

    /// Returns the control points `P0..P3`.
    #[must_use]
    pub fn control_points(&self) -> &[Point3; 4] {
        &self.control_points
    }

    /// Returns `P0`.
    #[must_use]
    pub fn start_point(&self) -> Point3 {
        self.control_points[0]
    }

    /// Returns `P3`.
    #[must_use]
    pub fn end_point(&self) -> Point3 {
        self.control_points[3]
    }

    /// Evaluates the curve at `t` in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] if `t` is outside `[0, 1]`.
    pub fn point(&self, t: f64) -> Result<Point3> {
        self.domain().check(t)?;
        Ok(self.eval(t))
    }

    /// First derivative at `t` in `[0, 1]`, not normalized.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] if `t` is outside `[0, 1]`.
    pub fn tangent(&self, t: f64) -> Result<Vector3> {
        self.domain().check(t)?;
        Ok(self.eval_deriv(t))
    }

    /// Samples `segments + 1` points at `t = 0, 1/n, ..., 1`.
    ///
    /// The first and last points are `P0` and `P3` exactly.
    ///
    /// # Errors
    ///
    /// Returns an error if `segments` is zero.
    pub fn approximate(&self, segments: usize) -> Result<Vec<Point3>> {
        tessellation::approximate(self, segments)
    }

    /// Length of the polyline returned by [`approximate`](Self::approximate).
    ///
    /// [`tessellation::DEFAULT_LENGTH_SEGMENTS`] is the customary sample count.
    ///
    /// # Errors
    ///
    /// Returns an error if `segments` is zero.
    pub fn approximated_length(&self, segments: usize) -> Result<f64> {
        tessellation::approximated_length(self, segments)
    }

    /// Adaptive flattening into a polyline whose chords deviate from the
    /// curve by less than `distance`.
    ///
    /// `segments` seeds that many equal parameter intervals before subdividing
    /// ([`tessellation::DEFAULT_FLATTENING_SEGMENTS`] is the customary value).
    ///
    /// A `distance <= 0` never accepts a chord early; refinement then stops at
    /// [`tessellation::MAX_SUBDIVISION_DEPTH`] with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if `distance` is NaN or `segments` is zero.
    pub fn flattening(&self, distance: f64, segments: usize) -> Result<Vec<Point3>> {
        let params = FlatteningParams::default()
            .with_distance(distance)
            .with_segments(segments);
        AdaptiveFlattener::new(params).flatten(self)
    }

    /// Returns the same curve traversed from `P3` to `P0`.
    #[must_use]
    pub fn reverse(&self) -> Self {
        let [p0, p1, p2, p3] = self.control_points;
        Self::new([p3, p2, p1, p0])
    }

    /// Maps every control point through `matrix`.
    #[must_use]
    pub fn transform(&self, matrix: &Matrix4) -> Self {
        Self::new(self.control_points.map(|p| transform_point(matrix, &p)))
    }

    /// Splits the curve at `t` with de Casteljau's algorithm.
    ///
    /// Returns `(left, right)` where `left` covers `[0, t]` and `right` covers `[t, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] if `t` is outside `[0, 1]`.
    pub fn split(&self, t: f64) -> Result<(Self, Self)> {
        self.domain().check(t)?;
        let [p0, p1, p2, p3] = self.control_points;
        let ab = lerp(&p0, &p1, t);
        let bc = lerp(&p1, &p2, t);
        let cd = lerp(&p2, &p3, t);
        let abc = lerp(&ab, &bc, t);
        let bcd = lerp(&bc, &cd, t);
        let abcd = lerp(&abc, &bcd, t);
        Ok((Self::new([p0, ab, abc, abcd]), Self::new([abcd, bcd, cd, p3])))
    }

    #[allow(clippy::many_single_char_names)]
    fn eval(&self, t: f64) -> Point3 {
        let [p0, p1, p2, p3] = &self.control_points;
        let s = 1.0 - t;
        let a = s * s * s;
        let b = 3.0 * s * s * t;
        let c = 3.0 * s * t * t;
        let d = t * t * t;
        Point3::from(p0.coords * a + p1.coords * b + p2.coords * c + p3.coords * d)
    }

    fn eval_deriv(&self, t: f64) -> Vector3 {
        let [p0, p1, p2, p3] = &self.control_points;
        let s = 1.0 - t;
        (p1 - p0) * (3.0 * s * s) + (p2 - p1) * (6.0 * s * t) + (p3 - p2) * (3.0 * t * t)
    }
}

impl TryFrom<&[Point3]> for CubicBezier {
    type Error = crate::error::BezflatError;

    fn try_from(points: &[Point3]) -> Result<Self> {
        let control_points: [Point3; 4] = points
            .try_into()
            .map_err(|_| GeometryError::InvalidControlPoints(points.len()))?;
        Ok(Self::new(control_points))
    }
}

impl Curve for CubicBezier {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        self.point(t)
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        Self::tangent(self, t)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, 1.0)
    }

    fn is_closed(&self) -> bool {
        is_close(&self.control_points[0], &self.control_points[3], TOLERANCE)
    }

    fn start_point(&self) -> Result<Point3> {
        Ok(self.control_points[0])
    }

    fn end_point(&self) -> Result<Point3> {
        Ok(self.control_points[3])
    }
}

/// Returns whether `b1` joins `b2` with G1 (tangent direction) continuity.
///
/// The end of `b1` must coincide with the start of `b2` and the unit tangents
/// `P3 - P2` of `b1` and `P1 - P0` of `b2` must agree within `g1_tol`
/// (compared through their dot product). Zero-length tangent legs are never
/// G1 continuous.
#[must_use]
pub fn have_g1_continuity(b1: &CubicBezier, b2: &CubicBezier, g1_tol: f64) -> bool {
    let [_, _, b1_p2, b1_p3] = b1.control_points;
    let [b2_p0, b2_p1, _, _] = b2.control_points;
    if !is_close(&b1_p3, &b2_p0, TOLERANCE) {
        return false;
    }
    let (Some(te), Some(ts)) = (
        (b1_p3 - b1_p2).try_normalize(TOLERANCE),
        (b2_p1 - b2_p0).try_normalize(TOLERANCE),
    ) else {
        return false;
    };
    (te.dot(&ts) - 1.0).abs() <= g1_tol
}
