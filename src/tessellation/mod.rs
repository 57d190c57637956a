mod flatten;
mod sample;

pub use flatten::AdaptiveFlattener;
pub use sample::{approximate, approximated_length};

use crate::error::{GeometryError, Result, TessellationError};

/// Default number of seed intervals for adaptive flattening.
pub const DEFAULT_FLATTENING_SEGMENTS: usize = 4;

/// Default sample count for [`approximated_length`].
pub const DEFAULT_LENGTH_SEGMENTS: usize = 128;

/// Hard cap on bisection levels below each seed interval.
pub const MAX_SUBDIVISION_DEPTH: u32 = 16;

/// Parameters controlling adaptive flattening.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatteningParams {
    /// Maximum allowed distance between the curve and its chords.
    pub distance: f64,
    /// Number of equal parameter intervals subdivided independently.
    pub segments: usize,
    /// Maximum bisection depth inside one seed interval.
    pub max_depth: u32,
}

impl Default for FlatteningParams {
    fn default() -> Self {
        Self {
            distance: 0.01,
            segments: DEFAULT_FLATTENING_SEGMENTS,
            max_depth: MAX_SUBDIVISION_DEPTH,
        }
    }
}

impl FlatteningParams {
    /// Sets the flatness tolerance.
    #[must_use]
    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = distance;
        self
    }

    /// Sets the number of seed intervals.
    #[must_use]
    pub fn with_segments(mut self, segments: usize) -> Self {
        self.segments = segments;
        self
    }

    /// Sets the maximum bisection depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Checks that the parameters describe a terminating flattening.
    ///
    /// A `distance <= 0` is accepted: no chord is ever flat enough, so every
    /// seed interval is bisected down to `max_depth`.
    ///
    /// # Errors
    ///
    /// Returns an error if `segments` is zero, `distance` is NaN, or
    /// `max_depth` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.segments == 0 {
            return Err(GeometryError::InvalidSegmentCount(self.segments).into());
        }
        if self.distance.is_nan() {
            return Err(TessellationError::InvalidParameters(
                "flattening distance must be a number".into(),
            )
            .into());
        }
        if self.max_depth == 0 {
            return Err(TessellationError::InvalidParameters(
                "max_depth must be at least 1".into(),
            )
            .into());
        }
        Ok(())
    }
}
