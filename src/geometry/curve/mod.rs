mod arc;
mod bezier;
mod ellipse;

pub use arc::Arc;
pub use bezier::{have_g1_continuity, CubicBezier, DEFAULT_G1_TOLERANCE};
pub use ellipse::{Ellipse, EllipseParams};

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3};

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// Length of the parameter range.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.t_max - self.t_min
    }

    /// Returns whether `t` lies inside the closed range.
    #[must_use]
    pub fn contains(&self, t: f64) -> bool {
        t >= self.t_min && t <= self.t_max
    }

    /// Fails with [`GeometryError::ParameterOutOfRange`] if `t` is outside the range.
    ///
    /// # Errors
    ///
    /// Returns an error if `t` is outside `[t_min, t_max]` or NaN.
    pub fn check(&self, t: f64) -> Result<()> {
        if self.contains(t) {
            Ok(())
        } else {
            Err(GeometryError::ParameterOutOfRange {
                parameter: "t",
                value: t,
                min: self.t_min,
                max: self.t_max,
            }
            .into())
        }
    }
}

/// Trait for parametric curves in 3D space.
pub trait Curve {
    /// Evaluates the curve at parameter `t`, returning the 3D point.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range.
    fn evaluate(&self, t: f64) -> Result<Point3>;

    /// Computes the first derivative at parameter `t`. The result is not normalized.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range.
    fn tangent(&self, t: f64) -> Result<Vector3>;

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain;

    /// Returns whether the curve is closed.
    fn is_closed(&self) -> bool;

    /// Point at the start of the domain.
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails.
    fn start_point(&self) -> Result<Point3> {
        self.evaluate(self.domain().t_min)
    }

    /// Point at the end of the domain.
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails.
    fn end_point(&self) -> Result<Point3> {
        self.evaluate(self.domain().t_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_check() {
        let d = CurveDomain::new(0.0, 1.0);
        assert!(d.check(0.0).is_ok());
        assert!(d.check(1.0).is_ok());
        assert!(d.check(-1e-9).is_err());
        assert!(d.check(f64::NAN).is_err());
        assert!((d.span() - 1.0).abs() < f64::EPSILON);
    }
}
