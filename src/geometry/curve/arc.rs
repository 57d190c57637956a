use crate::error::{GeometryError, Result};
use crate::math::angle::{arc_angle_span, normalize_angle};
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::operations::conversion::{bezier_from_arc, BezierCurves};

use super::{Curve, CurveDomain};

/// A circular arc in the XY plane.
///
/// Sweeps counter-clockwise from `start_angle` to `end_angle`, both in
/// degrees. The curve parameter is the angle in radians.
#[derive(Debug, Clone)]
pub struct Arc {
    center: Point3,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
}

impl Arc {
    /// Creates a new arc.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive.
    pub fn new(center: Point3, radius: f64, start_angle: f64, end_angle: f64) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(GeometryError::Degenerate("arc radius must be positive".into()).into());
        }
        Ok(Self {
            center,
            radius,
            start_angle,
            end_angle,
        })
    }

    /// Returns the center of the arc.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the radius of the arc.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the start angle in degrees.
    #[must_use]
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// Returns the end angle in degrees.
    #[must_use]
    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    /// Counter-clockwise span in degrees.
    #[must_use]
    pub fn angle_span(&self) -> f64 {
        arc_angle_span(self.start_angle, self.end_angle, 360.0)
    }

    /// Converts the arc into cubic Bezier curves.
    ///
    /// # Errors
    ///
    /// Returns an error if `segments` is zero.
    pub fn to_bezier(&self, segments: usize) -> Result<BezierCurves> {
        bezier_from_arc(
            self.center,
            self.radius,
            self.start_angle,
            self.end_angle,
            segments,
        )
    }
}

impl Curve for Arc {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        self.domain().check(t)?;
        let (sin, cos) = t.sin_cos();
        Ok(self.center + Vector3::new(cos, sin, 0.0) * self.radius)
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        self.domain().check(t)?;
        let (sin, cos) = t.sin_cos();
        Ok(Vector3::new(-sin, cos, 0.0) * self.radius)
    }

    fn domain(&self) -> CurveDomain {
        let start = normalize_angle(self.start_angle, 360.0).to_radians();
        CurveDomain::new(start, start + self.angle_span().to_radians())
    }

    fn is_closed(&self) -> bool {
        (self.angle_span() - 360.0).abs() < TOLERANCE
    }
}
