//! 3×3 row-major matrix utilities
//!
//! Rotations are stored as `[f64; 9]` in row-major order and act on column
//! vectors: `p' = R · p`.

use lin_alg::f64::Vec3;

pub const IDENTITY_3X3: [f64; 9] = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];

/// Transform a raw point by a 3×3 row-major matrix
pub fn transform_point(m: &[f64; 9], p: &[f64; 3]) -> [f64; 3] {
    [
        m[0] * p[0] + m[1] * p[1] + m[2] * p[2],
        m[3] * p[0] + m[4] * p[1] + m[5] * p[2],
        m[6] * p[0] + m[7] * p[1] + m[8] * p[2],
    ]
}

/// result = left * right
pub fn multiply_3x3(left: &[f64; 9], right: &[f64; 9]) -> [f64; 9] {
    let mut out = [0.0f64; 9];
    for row in 0..3 {
        for col in 0..3 {
            out[row * 3 + col] = left[row * 3] * right[col]
                + left[row * 3 + 1] * right[3 + col]
                + left[row * 3 + 2] * right[6 + col];
        }
    }
    out
}

pub fn transpose_3x3(m: &[f64; 9]) -> [f64; 9] {
    [m[0], m[3], m[6], m[1], m[4], m[7], m[2], m[5], m[8]]
}

pub fn determinant_3x3(m: &[f64; 9]) -> f64 {
    m[0] * (m[4] * m[8] - m[5] * m[7]) - m[1] * (m[3] * m[8] - m[5] * m[6])
        + m[2] * (m[3] * m[7] - m[4] * m[6])
}

/// Check if a 3×3 matrix is the identity within `tol` per entry
pub fn is_identity_3x3(m: &[f64; 9], tol: f64) -> bool {
    m.iter()
        .zip(IDENTITY_3X3.iter())
        .all(|(a, b)| (a - b).abs() <= tol)
}

/// Orthogonal (Rᵀ·R = I) with determinant +1, within `tol`
pub fn is_proper_rotation(m: &[f64; 9], tol: f64) -> bool {
    let rtr = multiply_3x3(&transpose_3x3(m), m);
    is_identity_3x3(&rtr, tol) && (determinant_3x3(m) - 1.0).abs() <= tol
}

/// Rotation by `angle` radians about `axis`, using Rodrigues' formula.
///
/// Returns the identity if the axis has zero length.
pub fn axis_angle_rotation(axis: Vec3, angle: f64) -> [f64; 9] {
    let len = axis.magnitude();
    if len < 1e-12 {
        return IDENTITY_3X3;
    }
    let x = axis.x / len;
    let y = axis.y / len;
    let z = axis.z / len;

    let c = angle.cos();
    let s = angle.sin();
    let t = 1.0 - c;

    [
        t * x * x + c,
        t * x * y - z * s,
        t * z * x + y * s,
        t * x * y + z * s,
        t * y * y + c,
        t * y * z - x * s,
        t * z * x - y * s,
        t * y * z + x * s,
        t * z * z + c,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_transform_point_identity() {
        let p = transform_point(&IDENTITY_3X3, &[1.0, 2.0, 3.0]);
        assert_eq!(p, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_quarter_turn_about_z() {
        let r = axis_angle_rotation(Vec3::new(0.0, 0.0, 2.0), FRAC_PI_2);
        let p = transform_point(&r, &[1.0, 0.0, 0.0]);
        assert!(p[0].abs() < 1e-12);
        assert!((p[1] - 1.0).abs() < 1e-12);
        assert!(p[2].abs() < 1e-12);
        assert!(is_proper_rotation(&r, 1e-12));
    }

    #[test]
    fn test_zero_axis_is_identity() {
        let r = axis_angle_rotation(Vec3::new_zero(), 1.0);
        assert!(is_identity_3x3(&r, 0.0));
    }

    #[test]
    fn test_multiply_by_transpose() {
        let r = axis_angle_rotation(Vec3::new(1.0, -2.0, 0.5), 0.7);
        let id = multiply_3x3(&r, &transpose_3x3(&r));
        assert!(is_identity_3x3(&id, 1e-12));
    }

    #[test]
    fn test_reflection_is_not_proper() {
        let mirror = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, -1.0];
        assert!((determinant_3x3(&mirror) + 1.0).abs() < 1e-12);
        assert!(!is_proper_rotation(&mirror, 1e-9));
    }
}
