//! Unit cell box vectors ↔ lengths and angles
//!
//! Box vectors are the three cell edges `a`, `b`, `c` as Cartesian vectors.
//! Angles are reported in degrees in the order ∠(a,b), ∠(b,c), ∠(c,a),
//! i.e. (γ, α, β) in crystallographic notation.

use lin_alg::f64::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{GeomError, GeomResult};

/// Cell edge lengths and inter-edge angles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxGeometry {
    /// |a|, |b|, |c|
    pub lengths: [f64; 3],
    /// ∠(a,b), ∠(b,c), ∠(c,a) in degrees
    pub angles: [f64; 3],
}

impl BoxGeometry {
    /// True when every angle is 90° within `tol` degrees
    pub fn is_orthorhombic(&self, tol: f64) -> bool {
        self.angles.iter().all(|a| (a - 90.0).abs() <= tol)
    }
}

fn to_vec3(v: &[f64; 3]) -> Vec3 {
    Vec3::new(v[0], v[1], v[2])
}

/// Convert one frame's box vectors to lengths and angles
pub fn box_vectors_to_lengths_angles(vectors: &[[f64; 3]; 3]) -> GeomResult<BoxGeometry> {
    let edges = [to_vec3(&vectors[0]), to_vec3(&vectors[1]), to_vec3(&vectors[2])];
    let lengths = [
        edges[0].magnitude(),
        edges[1].magnitude(),
        edges[2].magnitude(),
    ];
    if lengths.iter().any(|&l| l == 0.0 || !l.is_finite()) {
        return Err(GeomError::InvalidBox(format!(
            "box vector lengths {lengths:?} must be non-zero and finite"
        )));
    }

    let mut angles = [0.0f64; 3];
    for (slot, (i, j)) in [(0usize, 1usize), (1, 2), (2, 0)].into_iter().enumerate() {
        let cos = edges[i].dot(edges[j]) / (lengths[i] * lengths[j]);
        angles[slot] = cos.clamp(-1.0, 1.0).acos().to_degrees();
    }

    Ok(BoxGeometry { lengths, angles })
}

/// Build box vectors from lengths and angles.
///
/// Uses the usual crystallographic orientation: `a` along x, `b` in the
/// xy-plane, `c` completing a right-handed cell.
pub fn lengths_angles_to_box_vectors(geometry: &BoxGeometry) -> GeomResult<[[f64; 3]; 3]> {
    let [a, b, c] = geometry.lengths;
    let [gamma_deg, alpha_deg, beta_deg] = geometry.angles;

    if [a, b, c].iter().any(|&l| !l.is_finite() || l <= 0.0) {
        return Err(GeomError::InvalidBox(format!(
            "lengths {:?} must be positive and finite",
            geometry.lengths
        )));
    }
    if [alpha_deg, beta_deg, gamma_deg]
        .iter()
        .any(|&ang| !ang.is_finite() || ang <= 0.0 || ang >= 180.0)
    {
        return Err(GeomError::InvalidBox(format!(
            "angles {:?} must lie strictly between 0 and 180 degrees",
            geometry.angles
        )));
    }

    let ca = alpha_deg.to_radians().cos();
    let cb = beta_deg.to_radians().cos();
    let cg = gamma_deg.to_radians().cos();
    let sg = gamma_deg.to_radians().sin();

    let cy = (ca - cb * cg) / sg;
    let cz_sq = 1.0 - cb * cb - cy * cy;
    if cz_sq <= 1e-12 {
        return Err(GeomError::InvalidBox(format!(
            "angles {:?} do not form a cell with positive volume",
            geometry.angles
        )));
    }

    Ok([
        [a, 0.0, 0.0],
        [b * cg, b * sg, 0.0],
        [c * cb, c * cy, c * cz_sq.sqrt()],
    ])
}
