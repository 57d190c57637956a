pub mod angle;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 4x4 transformation matrix.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Linear interpolation between two points, `a` at `t = 0` and `b` at `t = 1`.
#[must_use]
pub fn lerp(a: &Point3, b: &Point3, t: f64) -> Point3 {
    a + (b - a) * t
}

/// Point on the unit circle in the XY plane at `angle` radians.
#[must_use]
pub fn point_from_angle(angle: f64) -> Point3 {
    let (sin, cos) = angle.sin_cos();
    Point3::new(cos, sin, 0.0)
}

/// Returns whether two points coincide within `tol`.
#[must_use]
pub fn is_close(a: &Point3, b: &Point3, tol: f64) -> bool {
    (a - b).norm() <= tol
}

/// Transforms a point by a 4x4 matrix (homogeneous coordinates).
#[must_use]
pub fn transform_point(matrix: &Matrix4, point: &Point3) -> Point3 {
    let v = matrix * nalgebra::Vector4::new(point.x, point.y, point.z, 1.0);
    if (v.w - 1.0).abs() > TOLERANCE && v.w.abs() > TOLERANCE {
        Point3::new(v.x / v.w, v.y / v.w, v.z / v.w)
    } else {
        Point3::new(v.x, v.y, v.z)
    }
}
