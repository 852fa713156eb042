//! Full superposition: center, fit with QCP, rotate and move onto the reference
//!
//! The fit uses only the selected points (all of them by default), but the
//! resulting transform is applied to every point of the mobile set.

use geomm_coords::selection::gather;
use geomm_coords::{center, centroid, Vec3};
use serde::{Deserialize, Serialize};

use crate::linalg::transform_point;
use crate::qcp::{check_inputs, qcp_kernel, AlignmentQuality};
use crate::settings::SuperimposeParams;
use crate::AlignResult;

/// Result of superimposing a mobile set onto a reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Superposition {
    /// Every mobile point after the transform
    pub coords: Vec<[f64; 3]>,
    /// Row-major rotation applied about the mobile centroid
    pub rotation: [f64; 9],
    /// Minimum RMSD over the fitted points
    pub rmsd: f64,
    pub quality: AlignmentQuality,
    /// Subtracted before rotating (origin when the input was pre-centered)
    pub mobile_centroid: [f64; 3],
    /// Added after rotating
    pub reference_centroid: [f64; 3],
}

impl Superposition {
    /// Apply the same transform to another point set, e.g. a ligand that
    /// travels with the mobile structure: `p' = R · (p − c_mob) + c_ref`.
    pub fn apply(&self, points: &[[f64; 3]]) -> Vec<[f64; 3]> {
        let [mx, my, mz] = self.mobile_centroid;
        let [rx, ry, rz] = self.reference_centroid;
        points
            .iter()
            .map(|p| {
                let q = transform_point(&self.rotation, &[p[0] - mx, p[1] - my, p[2] - mz]);
                [q[0] + rx, q[1] + ry, q[2] + rz]
            })
            .collect()
    }
}

/// Superimpose `mobile` onto `reference` with default parameters.
///
/// See [`superimpose_with`].
pub fn superimpose(
    reference: &[[f64; 3]],
    mobile: &[[f64; 3]],
    idxs: Option<&[usize]>,
    weights: Option<&[f64]>,
) -> AlignResult<Superposition> {
    superimpose_with(reference, mobile, idxs, weights, &SuperimposeParams::default())
}

/// Superimpose `mobile` onto `reference`.
///
/// Unless `params.centered` is set, both sets are first centered on the
/// weighted centroid of their selected points. `weights` has one entry per
/// selected point (per point of `idxs` if given, else per point). The
/// rotated mobile set is translated onto the reference centroid.
///
/// Degraded fits (no convergence, non-unique rotation) are returned
/// normally and flagged in [`Superposition::quality`].
pub fn superimpose_with(
    reference: &[[f64; 3]],
    mobile: &[[f64; 3]],
    idxs: Option<&[usize]>,
    weights: Option<&[f64]>,
    params: &SuperimposeParams,
) -> AlignResult<Superposition> {
    params.qcp.validate()?;
    check_inputs(reference, mobile, idxs, weights)?;

    let (ref_sel, mob_sel) = match idxs {
        Some(idxs) => (gather(reference, idxs), gather(mobile, idxs)),
        None => (reference.to_vec(), mobile.to_vec()),
    };

    let (ref_centroid, mob_centroid) = if params.centered {
        (Vec3::new_zero(), Vec3::new_zero())
    } else {
        (centroid(&ref_sel, weights)?, centroid(&mob_sel, weights)?)
    };

    let fit = qcp_kernel(
        &center(&ref_sel, ref_centroid),
        &center(&mob_sel, mob_centroid),
        weights,
        &params.qcp,
    );

    if fit.quality.is_degraded() {
        log::warn!(
            "superimpose: degraded fit over {} points (converged: {}, degenerate rotation: {}, {} iterations)",
            ref_sel.len(),
            fit.quality.converged,
            fit.quality.rotation_degenerate,
            fit.quality.iterations
        );
    }

    let mut result = Superposition {
        coords: Vec::new(),
        rotation: fit.rotation,
        rmsd: fit.rmsd,
        quality: fit.quality,
        mobile_centroid: [mob_centroid.x, mob_centroid.y, mob_centroid.z],
        reference_centroid: [ref_centroid.x, ref_centroid.y, ref_centroid.z],
    };
    result.coords = result.apply(mobile);
    Ok(result)
}
