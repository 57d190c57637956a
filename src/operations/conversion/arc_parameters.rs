use std::f64::consts::FRAC_PI_2;
use std::iter::FusedIterator;

use crate::error::{GeometryError, Result};
use crate::math::angle::ANGLE_TOLERANCE;
use crate::math::{point_from_angle, Point3, Vector3};

/// Tangent factor of the classic circular arc approximation:
/// control points sit `4/3 * tan(span / 4)` away from the end points.
pub const DEFAULT_TANGENT_FACTOR: f64 = 4.0 / 3.0;

/// Alternative tangent factor that spreads the radial error more evenly.
///
/// Not used unless selected with [`ArcParameters::with_tangent_factor`].
pub const OPTIMIZED_TANGENT_FACTOR: f64 = 1.332_440_737_410_893_5;

/// Control points of successive cubic Bezier arcs on the unit circle.
///
/// Covers `start_angle..end_angle` (radians, counter-clockwise) with equal
/// sub-arcs, none wider than 90 degrees. Each item is
/// `[start_point, ctrl1, ctrl2, end_point]` in the XY plane.
#[derive(Debug, Clone)]
pub struct ArcParameters {
    start_angle: f64,
    end_angle: f64,
    segment_angle: f64,
    tangent_length: f64,
    arc_count: usize,
    index: usize,
    last_end: Option<Point3>,
}

impl ArcParameters {
    /// Creates the generator.
    ///
    /// The sub-arc count is `max(segments, ceil(span / 90 degrees))`.
    ///
    /// # Errors
    ///
    /// Returns an error if `segments` is zero or `end_angle` is not greater
    /// than `start_angle`.
    pub fn new(start_angle: f64, end_angle: f64, segments: usize) -> Result<Self> {
        if segments == 0 {
            return Err(GeometryError::InvalidSegmentCount(segments).into());
        }
        let span = end_angle - start_angle;
        if !(span > 0.0 && span.is_finite()) {
            return Err(GeometryError::InvalidAngleRange {
                start: start_angle,
                end: end_angle,
            }
            .into());
        }

        // Spans that are a multiple of 90 degrees up to round-off are not split further.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let quarter_arcs = (span / FRAC_PI_2 - ANGLE_TOLERANCE).ceil().max(1.0) as usize;
        let arc_count = quarter_arcs.max(segments);
        #[allow(clippy::cast_precision_loss)]
        let segment_angle = span / arc_count as f64;

        Ok(Self {
            start_angle,
            end_angle,
            segment_angle,
            tangent_length: DEFAULT_TANGENT_FACTOR * (segment_angle / 4.0).tan(),
            arc_count,
            index: 0,
            last_end: None,
        })
    }

    /// Replaces the tangent factor, e.g. with [`OPTIMIZED_TANGENT_FACTOR`].
    #[must_use]
    pub fn with_tangent_factor(mut self, factor: f64) -> Self {
        self.tangent_length = factor * (self.segment_angle / 4.0).tan();
        self
    }

    /// Number of sub-arcs the generator yields in total.
    #[must_use]
    pub fn arc_count(&self) -> usize {
        self.arc_count
    }

    /// Angular span of each sub-arc in radians.
    #[must_use]
    pub fn segment_angle(&self) -> f64 {
        self.segment_angle
    }

    fn angle_at(&self, index: usize) -> f64 {
        if index == self.arc_count {
            self.end_angle
        } else {
            #[allow(clippy::cast_precision_loss)]
            let offset = self.segment_angle * index as f64;
            self.start_angle + offset
        }
    }
}

impl Iterator for ArcParameters {
    type Item = [Point3; 4];

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.arc_count {
            return None;
        }
        let start_point = self
            .last_end
            .unwrap_or_else(|| point_from_angle(self.angle_at(self.index)));
        self.index += 1;
        let end_point = point_from_angle(self.angle_at(self.index));
        self.last_end = Some(end_point);

        let tl = self.tangent_length;
        let ctrl1 = start_point + Vector3::new(-start_point.y * tl, start_point.x * tl, 0.0);
        let ctrl2 = end_point + Vector3::new(end_point.y * tl, -end_point.x * tl, 0.0);
        Some([start_point, ctrl1, ctrl2, end_point])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.arc_count - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ArcParameters {}

impl FusedIterator for ArcParameters {}

/// Control points approximating the unit circle arc from `start_angle` to
/// `end_angle` (radians); see [`ArcParameters::new`].
///
/// # Errors
///
/// Returns an error if `segments` is zero or `end_angle <= start_angle`.
pub fn arc_parameters(start_angle: f64, end_angle: f64, segments: usize) -> Result<ArcParameters> {
    ArcParameters::new(start_angle, end_angle, segments)
}
