pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod tessellation;

pub use error::{BezflatError, Result};
pub use geometry::{Arc, CubicBezier, Curve, CurveDomain, Ellipse, EllipseParams};
pub use operations::conversion::{arc_parameters, bezier_from_arc, bezier_from_ellipse};
pub use tessellation::{AdaptiveFlattener, FlatteningParams};
