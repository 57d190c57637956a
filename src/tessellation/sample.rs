use crate::error::{GeometryError, Result};
use crate::geometry::Curve;
use crate::math::Point3;

/// Samples `segments + 1` points at equal parameter steps over the curve domain.
///
/// The first and last points come from [`Curve::start_point`] and
/// [`Curve::end_point`] so the extremes carry no round-off.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidSegmentCount`] if `segments` is zero, or
/// any evaluation error of the curve.
pub fn approximate<C: Curve + ?Sized>(curve: &C, segments: usize) -> Result<Vec<Point3>> {
    if segments == 0 {
        return Err(GeometryError::InvalidSegmentCount(segments).into());
    }
    let domain = curve.domain();
    #[allow(clippy::cast_precision_loss)]
    let delta = domain.span() / segments as f64;

    let mut points = Vec::with_capacity(segments + 1);
    points.push(curve.start_point()?);
    for i in 1..segments {
        #[allow(clippy::cast_precision_loss)]
        let t = domain.t_min + delta * i as f64;
        points.push(curve.evaluate(t)?);
    }
    points.push(curve.end_point()?);
    Ok(points)
}

/// Length of the polyline from [`approximate`], an estimate of the arc length.
///
/// # Errors
///
/// Returns an error if `segments` is zero or evaluation fails.
pub fn approximated_length<C: Curve + ?Sized>(curve: &C, segments: usize) -> Result<f64> {
    let points = approximate(curve, segments)?;
    Ok(points
        .windows(2)
        .map(|pair| nalgebra::distance(&pair[0], &pair[1]))
        .sum())
}
