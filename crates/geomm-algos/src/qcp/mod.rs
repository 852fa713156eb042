//! Theobald QCP superposition kernel
//!
//! Minimum RMSD and optimal rotation between two centered point sets:
//!
//! 1. [`inner_product`] accumulates the 3×3 cross-sums and E0
//! 2. [`max_eigenvalue`] finds the top root of the key matrix's
//!    characteristic polynomial by Newton-Raphson
//! 3. [`rotation_from_eigenvalue`] recovers the quaternion from cofactors
//! 4. [`rmsd_from_eigenvalue`] turns the Rayleigh quotient of that
//!    quaternion into the RMSD, so it is the RMSD the rotation achieves
//!
//! References: Theobald, Acta Cryst. A61 (2005) 478; Liu, Agrafiotis &
//! Theobald, J. Comput. Chem. 31 (2010) 1561.

mod inner_product;
mod rotation;
mod solver;

pub use inner_product::{inner_product, InnerProduct};
pub use rotation::{
    key_matrix_quotient, quaternion_to_rotation, rotation_from_eigenvalue, RotationSolution,
};
pub use solver::{characteristic_coefficients, max_eigenvalue, EigenSolution};

use geomm_coords::selection::{check_len, gather, validate_indices, validate_weights};
use geomm_coords::{GeomError, GeomResult};
use serde::{Deserialize, Serialize};

use crate::linalg::IDENTITY_3X3;
use crate::settings::QcpSettings;
use crate::AlignResult;

/// How cleanly the kernel reached its answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentQuality {
    /// Newton-Raphson iterations (0 when the cross-sums vanish)
    pub iterations: u32,
    /// False if the iteration budget ran out first
    pub converged: bool,
    /// The optimal rotation is not unique (single point, collinear or
    /// zero-extent sets); the reported one is a valid choice
    pub rotation_degenerate: bool,
}

impl AlignmentQuality {
    pub fn is_degraded(&self) -> bool {
        !self.converged || self.rotation_degenerate
    }
}

/// Output of [`theobald_qcp`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QcpResult {
    pub rmsd: f64,
    /// Row-major; maps the mobile set onto the reference (p' = R · p)
    pub rotation: [f64; 9],
    pub quality: AlignmentQuality,
}

/// RMSD implied by the top eigenvalue: sqrt(max(0, E0 − 2λ) / n)
pub fn rmsd_from_eigenvalue(e0: f64, lambda: f64, n: usize) -> f64 {
    ((e0 - 2.0 * lambda).max(0.0) / n as f64).sqrt()
}

/// Shared precondition checks; returns the number of points that will
/// drive the alignment (the subset length if `idxs` is given).
///
/// Weights are indexed by position in `idxs` when a subset is given.
pub(crate) fn check_inputs(
    reference: &[[f64; 3]],
    mobile: &[[f64; 3]],
    idxs: Option<&[usize]>,
    weights: Option<&[f64]>,
) -> GeomResult<usize> {
    check_len("point count", reference.len(), mobile.len())?;
    if reference.is_empty() {
        return Err(GeomError::EmptyPointSet);
    }
    let n = match idxs {
        Some(idxs) => {
            validate_indices(idxs, reference.len())?;
            idxs.len()
        }
        None => reference.len(),
    };
    if n == 0 {
        return Err(GeomError::EmptyPointSet);
    }
    if let Some(w) = weights {
        validate_weights(w, n)?;
    }
    Ok(n)
}

/// Run the kernel on inputs whose checks have already passed
pub(crate) fn qcp_kernel(
    reference: &[[f64; 3]],
    mobile: &[[f64; 3]],
    weights: Option<&[f64]>,
    settings: &QcpSettings,
) -> QcpResult {
    let ip = inner_product(reference, mobile, weights);
    let eigen = max_eigenvalue(&ip, settings);

    let (rotation, lambda) = if ip.is_degenerate() {
        log::debug!("qcp: cross-sums vanish, any rotation is optimal");
        let rotation = RotationSolution {
            matrix: IDENTITY_3X3,
            quaternion: [1.0, 0.0, 0.0, 0.0],
            degenerate: true,
        };
        (rotation, eigen.lambda)
    } else {
        let rotation = rotation_from_eigenvalue(&ip.matrix, eigen.lambda, settings);
        // λ is only good to about sqrt(ε) at a repeated root
        let lambda = key_matrix_quotient(&ip.matrix, &rotation.quaternion);
        (rotation, lambda)
    };
    let rmsd = rmsd_from_eigenvalue(ip.e0(), lambda, reference.len());

    QcpResult {
        rmsd,
        rotation: rotation.matrix,
        quality: AlignmentQuality {
            iterations: eigen.iterations,
            converged: eigen.converged,
            rotation_degenerate: rotation.degenerate,
        },
    }
}

/// Minimum RMSD and optimal rotation of `mobile` onto `reference`.
///
/// Both sets must already be centered (on their weighted centroids, over
/// the subset if `idxs` is given); nothing is translated or rotated here.
/// With `idxs`, only the selected points and their `weights` (one per
/// selected point) enter the fit, and the RMSD divides by the subset length.
pub fn theobald_qcp(
    reference: &[[f64; 3]],
    mobile: &[[f64; 3]],
    idxs: Option<&[usize]>,
    weights: Option<&[f64]>,
    settings: &QcpSettings,
) -> AlignResult<QcpResult> {
    settings.validate()?;
    check_inputs(reference, mobile, idxs, weights)?;

    let result = match idxs {
        Some(idxs) => qcp_kernel(
            &gather(reference, idxs),
            &gather(mobile, idxs),
            weights,
            settings,
        ),
        None => qcp_kernel(reference, mobile, weights, settings),
    };
    Ok(result)
}
