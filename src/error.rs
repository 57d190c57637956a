use thiserror::Error;

/// Top-level error type for the bezflat crate.
#[derive(Debug, Error)]
pub enum BezflatError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// Errors related to curve construction and evaluation.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("a cubic Bezier curve requires exactly 4 control points, got {0}")]
    InvalidControlPoints(usize),

    #[error("end angle {end} must be greater than start angle {start}")]
    InvalidAngleRange { start: f64, end: f64 },

    #[error("segment count must be at least 1, got {0}")]
    InvalidSegmentCount(usize),

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to curve approximation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),
}

/// Convenience type alias for results using [`BezflatError`].
pub type Result<T> = std::result::Result<T, BezflatError>;
