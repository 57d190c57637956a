pub mod curve;

pub use curve::{have_g1_continuity, Arc, CubicBezier, Curve, CurveDomain, Ellipse, EllipseParams};
