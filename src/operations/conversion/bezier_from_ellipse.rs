use std::f64::consts::TAU;

use tracing::debug;

use crate::error::{GeometryError, Result};
use crate::geometry::EllipseParams;
use crate::math::angle::{normalize_angle, ANGLE_TOLERANCE};

use super::{ArcParameters, BezierCurves};

/// Approximates an elliptical arc with cubic Bezier curves.
#[derive(Debug)]
pub struct BezierFromEllipse<'a, E: EllipseParams + ?Sized> {
    ellipse: &'a E,
    segments: usize,
}

impl<'a, E: EllipseParams + ?Sized> BezierFromEllipse<'a, E> {
    /// Creates a new `BezierFromEllipse` operation.
    #[must_use]
    pub fn new(ellipse: &'a E, segments: usize) -> Self {
        Self { ellipse, segments }
    }

    /// Executes the conversion, returning the curves in parameter order.
    ///
    /// Unit-circle control points `(x, y)` are mapped to
    /// `center + major_axis * x + minor_axis * y`.
    ///
    /// # Errors
    ///
    /// Returns an error if `segments` is zero.
    pub fn execute(&self) -> Result<BezierCurves> {
        if self.segments == 0 {
            return Err(GeometryError::InvalidSegmentCount(self.segments).into());
        }
        let span = self.ellipse.param_span();
        if span < ANGLE_TOLERANCE {
            return Ok(BezierCurves::empty());
        }

        let start = normalize_angle(self.ellipse.start_param(), TAU);
        let params = ArcParameters::new(start, start + span, self.segments)?;
        debug!(span, arcs = params.arc_count(), "converting ellipse to Bezier curves");
        Ok(BezierCurves::new(
            params,
            self.ellipse.center(),
            self.ellipse.major_axis(),
            self.ellipse.minor_axis(),
        ))
    }
}

/// Cubic Bezier curves approximating `ellipse` from its start to its end param.
///
/// # Errors
///
/// Returns an error if `segments` is zero.
pub fn bezier_from_ellipse<E: EllipseParams + ?Sized>(
    ellipse: &E,
    segments: usize,
) -> Result<BezierCurves> {
    BezierFromEllipse::new(ellipse, segments).execute()
}
