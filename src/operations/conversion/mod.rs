//! Conversion of circular and elliptical arcs into cubic Bezier curves.
//!
//! [`ArcParameters`] approximates an arc of the unit circle; the converters
//! map its control points into world space and yield one [`CubicBezier`]
//! per sub-arc through the lazy [`BezierCurves`] iterator.

mod arc_parameters;
mod bezier_from_arc;
mod bezier_from_ellipse;

pub use arc_parameters::{
    arc_parameters, ArcParameters, DEFAULT_TANGENT_FACTOR, OPTIMIZED_TANGENT_FACTOR,
};
pub use bezier_from_arc::{bezier_from_arc, BezierFromArc};
pub use bezier_from_ellipse::{bezier_from_ellipse, BezierFromEllipse};

use std::iter::FusedIterator;

use crate::geometry::CubicBezier;
use crate::math::{Point3, Vector3};

/// Lazy sequence of cubic Bezier curves approximating an arc.
///
/// Each unit-circle point `(x, y)` maps to `center + x_axis * x + y_axis * y`.
#[derive(Debug, Clone)]
pub struct BezierCurves {
    params: Option<ArcParameters>,
    center: Point3,
    x_axis: Vector3,
    y_axis: Vector3,
}

impl BezierCurves {
    fn new(params: ArcParameters, center: Point3, x_axis: Vector3, y_axis: Vector3) -> Self {
        Self {
            params: Some(params),
            center,
            x_axis,
            y_axis,
        }
    }

    /// The sequence of a zero-length arc.
    fn empty() -> Self {
        Self {
            params: None,
            center: Point3::origin(),
            x_axis: Vector3::zeros(),
            y_axis: Vector3::zeros(),
        }
    }

    fn to_world(&self, p: &Point3) -> Point3 {
        self.center + self.x_axis * p.x + self.y_axis * p.y
    }
}

impl Iterator for BezierCurves {
    type Item = CubicBezier;

    fn next(&mut self) -> Option<Self::Item> {
        let control_points = self.params.as_mut()?.next()?;
        Some(CubicBezier::new(control_points.map(|p| self.to_world(&p))))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.params
            .as_ref()
            .map_or((0, Some(0)), Iterator::size_hint)
    }
}

impl ExactSizeIterator for BezierCurves {}

impl FusedIterator for BezierCurves {}
