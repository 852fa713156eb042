//! Rotation recovered from the top eigenvalue of the key matrix
//!
//! Any non-zero row of adj(K − λI) is proportional to the eigenvector for
//! λ, i.e. the optimal quaternion. The four rows are built straight from
//! the cross-sums and the best-conditioned one is used.

use crate::linalg::IDENTITY_3X3;
use crate::settings::QcpSettings;

/// Rotation as a row-major matrix plus the unit quaternion it came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationSolution {
    pub matrix: [f64; 9],
    /// (w, x, y, z); the sign is arbitrary
    pub quaternion: [f64; 4],
    /// No cofactor row was usable; the rotation is one of several optimal ones
    pub degenerate: bool,
}

impl RotationSolution {
    fn identity() -> Self {
        Self {
            matrix: IDENTITY_3X3,
            quaternion: [1.0, 0.0, 0.0, 0.0],
            degenerate: true,
        }
    }

    fn from_quaternion(q: [f64; 4], degenerate: bool) -> Self {
        Self {
            matrix: quaternion_to_rotation(&q),
            quaternion: q,
            degenerate,
        }
    }
}

/// Row-major rotation matrix of a unit quaternion (w, x, y, z)
pub fn quaternion_to_rotation(q: &[f64; 4]) -> [f64; 9] {
    let [q1, q2, q3, q4] = *q;

    let a2 = q1 * q1;
    let x2 = q2 * q2;
    let y2 = q3 * q3;
    let z2 = q4 * q4;

    let xy = q2 * q3;
    let az = q1 * q4;
    let zx = q4 * q2;
    let ay = q1 * q3;
    let yz = q3 * q4;
    let ax = q1 * q2;

    [
        a2 + x2 - y2 - z2,
        2.0 * (xy + az),
        2.0 * (zx - ay),
        2.0 * (xy - az),
        a2 - x2 + y2 - z2,
        2.0 * (yz + ax),
        2.0 * (zx + ay),
        2.0 * (yz - ax),
        a2 - x2 - y2 + z2,
    ]
}

/// Symmetric K − λI, built from the cross-sums
fn shifted_key_matrix(s: &[f64; 9], lambda: f64) -> [[f64; 4]; 4] {
    let [sxx, sxy, sxz, syx, syy, syz, szx, szy, szz] = *s;

    let a11 = sxx + syy + szz - lambda;
    let a12 = syz - szy;
    let a13 = szx - sxz;
    let a14 = sxy - syx;
    let a22 = sxx - syy - szz - lambda;
    let a23 = sxy + syx;
    let a24 = sxz + szx;
    let a33 = syy - sxx - szz - lambda;
    let a34 = syz + szy;
    let a44 = szz - sxx - syy - lambda;

    [
        [a11, a12, a13, a14],
        [a12, a22, a23, a24],
        [a13, a23, a33, a34],
        [a14, a24, a34, a44],
    ]
}

/// Rayleigh quotient qᵀ·K·q of a unit quaternion.
///
/// E0 − 2·qᵀKq is the weighted squared deviation that the rotation of `q`
/// actually achieves, accurate to rounding even where λ itself is not.
pub fn key_matrix_quotient(s: &[f64; 9], q: &[f64; 4]) -> f64 {
    let k = shifted_key_matrix(s, 0.0);
    let mut total = 0.0;
    for (row, qi) in k.iter().zip(q) {
        total += qi * dot4(row, q);
    }
    total
}

/// The four rows of adj(K − λI), expanded via shared 2×2 minors
fn cofactor_rows(m: &[[f64; 4]; 4]) -> [[f64; 4]; 4] {
    let [[a11, a12, a13, a14], [a21, a22, a23, a24], [a31, a32, a33, a34], [a41, a42, a43, a44]] =
        *m;

    let m3344 = a33 * a44 - a43 * a34;
    let m3244 = a32 * a44 - a42 * a34;
    let m3243 = a32 * a43 - a42 * a33;
    let m3143 = a31 * a43 - a41 * a33;
    let m3144 = a31 * a44 - a41 * a34;
    let m3142 = a31 * a42 - a41 * a32;
    let m1324 = a13 * a24 - a14 * a23;
    let m1224 = a12 * a24 - a14 * a22;
    let m1223 = a12 * a23 - a13 * a22;
    let m1124 = a11 * a24 - a14 * a21;
    let m1123 = a11 * a23 - a13 * a21;
    let m1122 = a11 * a22 - a12 * a21;

    [
        [
            a22 * m3344 - a23 * m3244 + a24 * m3243,
            -a21 * m3344 + a23 * m3144 - a24 * m3143,
            a21 * m3244 - a22 * m3144 + a24 * m3142,
            -a21 * m3243 + a22 * m3143 - a23 * m3142,
        ],
        [
            a12 * m3344 - a13 * m3244 + a14 * m3243,
            -a11 * m3344 + a13 * m3144 - a14 * m3143,
            a11 * m3244 - a12 * m3144 + a14 * m3142,
            -a11 * m3243 + a12 * m3143 - a13 * m3142,
        ],
        [
            a42 * m1324 - a43 * m1224 + a44 * m1223,
            -a41 * m1324 + a43 * m1124 - a44 * m1123,
            a41 * m1224 - a42 * m1124 + a44 * m1122,
            -a41 * m1223 + a42 * m1123 - a43 * m1122,
        ],
        [
            a32 * m1324 - a33 * m1224 + a34 * m1223,
            -a31 * m1324 + a33 * m1124 - a34 * m1123,
            a31 * m1224 - a32 * m1124 + a34 * m1122,
            -a31 * m1223 + a32 * m1123 - a33 * m1122,
        ],
    ]
}

fn dot4(a: &[f64; 4], b: &[f64; 4]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]
}

fn subtract_projections(v: &mut [f64; 4], basis: &[[f64; 4]]) {
    for u in basis {
        let d = dot4(v, u);
        for k in 0..4 {
            v[k] -= d * u[k];
        }
    }
}

/// Unit vector in the null space of the (scaled) matrix `m`.
///
/// Orthonormalizes the columns of `m`, dropping those below `tol`, then
/// returns the unit axis with the largest component outside their span.
fn null_space_vector(m: &[[f64; 4]; 4], tol: f64) -> Option<[f64; 4]> {
    let mut basis: Vec<[f64; 4]> = Vec::with_capacity(4);
    for col in 0..4 {
        let mut v = [m[0][col], m[1][col], m[2][col], m[3][col]];
        subtract_projections(&mut v, &basis);
        let norm = dot4(&v, &v).sqrt();
        if norm > tol {
            basis.push(v.map(|x| x / norm));
        }
    }

    let mut best: Option<([f64; 4], f64)> = None;
    for axis in 0..4 {
        let mut v = [0.0f64; 4];
        v[axis] = 1.0;
        subtract_projections(&mut v, &basis);
        let norm = dot4(&v, &v).sqrt();
        if best.map_or(true, |(_, n)| norm > n) {
            best = Some((v, norm));
        }
    }

    match best {
        Some((v, norm)) if norm > f64::EPSILON => Some(v.map(|x| x / norm)),
        _ => None,
    }
}

/// Optimal rotation for cross-sums `s` given the top eigenvalue `lambda`.
///
/// The returned matrix maps the mobile set onto the reference set.
pub fn rotation_from_eigenvalue(
    s: &[f64; 9],
    lambda: f64,
    settings: &QcpSettings,
) -> RotationSolution {
    let shifted = shifted_key_matrix(s, lambda);
    let scale = shifted
        .iter()
        .flatten()
        .fold(0.0f64, |acc, x| acc.max(x.abs()));
    if scale == 0.0 {
        log::debug!("qcp: key matrix vanishes, using identity rotation");
        return RotationSolution::identity();
    }

    let rows = cofactor_rows(&shifted);
    let norms = rows.map(|row| dot4(&row, &row).sqrt());
    let mut best = 0;
    for i in 1..4 {
        if norms[i] > norms[best] {
            best = i;
        }
    }

    if norms[best] > settings.eigenvector_precision * scale.powi(3) {
        let q = rows[best].map(|x| x / norms[best]);
        return RotationSolution::from_quaternion(q, false);
    }

    // Top eigenvalue is (near) repeated: every cofactor row collapses.
    log::debug!("qcp: cofactor rows degenerate, falling back to null-space search");
    let scaled = shifted.map(|row| row.map(|x| x / scale));
    match null_space_vector(&scaled, settings.eigenvector_precision) {
        Some(q) => RotationSolution::from_quaternion(q, true),
        None => RotationSolution::identity(),
    }
}
