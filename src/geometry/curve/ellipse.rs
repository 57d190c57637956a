use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::math::angle::{arc_angle_span, normalize_angle};
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::operations::conversion::{bezier_from_ellipse, BezierCurves};

use super::{Curve, CurveDomain};

/// Parameters describing an elliptical arc.
///
/// The axis vectors carry both scale and orientation:
/// `P(t) = center + major_axis * cos(t) + minor_axis * sin(t)`.
pub trait EllipseParams {
    /// Center of the ellipse.
    fn center(&self) -> Point3;

    /// Major axis vector, from the center to the point at `t = 0`.
    fn major_axis(&self) -> Vector3;

    /// Minor axis vector, from the center to the point at `t = pi/2`.
    fn minor_axis(&self) -> Vector3;

    /// Start parameter in radians.
    fn start_param(&self) -> f64;

    /// End parameter in radians.
    fn end_param(&self) -> f64;

    /// Counter-clockwise parameter span from start to end, in `[0, 2pi]`.
    fn param_span(&self) -> f64 {
        arc_angle_span(self.start_param(), self.end_param(), TAU)
    }
}

/// An ellipse (or elliptical arc) in 3D space.
///
/// Defined the way DXF defines it: a center, a major axis vector, the
/// extrusion (normal) of the ellipse plane, the ratio of minor to major axis
/// length, and a parameter range in radians.
///
/// `minor_axis = normalize(extrusion x major_axis) * |major_axis| * ratio`.
#[derive(Debug, Clone)]
pub struct Ellipse {
    center: Point3,
    major_axis: Vector3,
    minor_axis: Vector3,
    extrusion: Vector3,
    ratio: f64,
    start_param: f64,
    end_param: f64,
}

impl Ellipse {
    /// Creates a new ellipse.
    ///
    /// # Arguments
    ///
    /// * `center` - Center of the ellipse
    /// * `major_axis` - Major axis vector (must be non-zero)
    /// * `extrusion` - Normal of the ellipse plane (must be perpendicular to `major_axis`)
    /// * `ratio` - Minor to major axis length ratio (must be positive)
    /// * `start_param` - Start parameter in radians
    /// * `end_param` - End parameter in radians
    ///
    /// # Errors
    ///
    /// Returns an error if the major axis or extrusion is zero-length, the
    /// ratio is non-positive, or the extrusion is not perpendicular to the
    /// major axis.
    pub fn new(
        center: Point3,
        major_axis: Vector3,
        extrusion: Vector3,
        ratio: f64,
        start_param: f64,
        end_param: f64,
    ) -> Result<Self> {
        let major_len = major_axis.norm();
        if major_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let extrusion = extrusion
            .try_normalize(TOLERANCE)
            .ok_or(GeometryError::ZeroVector)?;
        if ratio < TOLERANCE {
            return Err(GeometryError::Degenerate("axis ratio must be positive".into()).into());
        }
        if extrusion.dot(&(major_axis / major_len)).abs() > TOLERANCE {
            return Err(GeometryError::Degenerate(
                "major axis must be perpendicular to extrusion".into(),
            )
            .into());
        }

        let minor_dir = extrusion.cross(&major_axis) / major_len;
        let minor_axis = minor_dir * (major_len * ratio);

        Ok(Self {
            center,
            major_axis,
            minor_axis,
            extrusion,
            ratio,
            start_param,
            end_param,
        })
    }

    /// Returns the extrusion (unit normal) of the ellipse plane.
    #[must_use]
    pub fn extrusion(&self) -> &Vector3 {
        &self.extrusion
    }

    /// Returns the minor to major axis ratio.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Converts the elliptical arc into cubic Bezier curves.
    ///
    /// # Errors
    ///
    /// Returns an error if `segments` is zero.
    pub fn to_bezier(&self, segments: usize) -> Result<BezierCurves> {
        bezier_from_ellipse(self, segments)
    }
}

impl EllipseParams for Ellipse {
    fn center(&self) -> Point3 {
        self.center
    }

    fn major_axis(&self) -> Vector3 {
        self.major_axis
    }

    fn minor_axis(&self) -> Vector3 {
        self.minor_axis
    }

    fn start_param(&self) -> f64 {
        self.start_param
    }

    fn end_param(&self) -> f64 {
        self.end_param
    }
}

impl Curve for Ellipse {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        self.domain().check(t)?;
        let (sin, cos) = t.sin_cos();
        Ok(self.center + self.major_axis * cos + self.minor_axis * sin)
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        self.domain().check(t)?;
        let (sin, cos) = t.sin_cos();
        Ok(self.minor_axis * cos - self.major_axis * sin)
    }

    fn domain(&self) -> CurveDomain {
        let start = normalize_angle(self.start_param, TAU);
        CurveDomain::new(start, start + self.param_span())
    }

    fn is_closed(&self) -> bool {
        (self.param_span() - TAU).abs() < TOLERANCE
    }
}
