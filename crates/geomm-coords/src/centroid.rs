//! Centroids of point sets
//!
//! With masses as weights the weighted centroid is the center of mass.

use lin_alg::f64::Vec3;

use crate::error::{GeomError, GeomResult};
use crate::selection::{validate_indices, validate_weights};

/// Arithmetic mean of a point set, optionally weighted.
///
/// `weights`, if given, must have one non-negative entry per point and a
/// non-zero total. They do not need to be normalized.
pub fn centroid(points: &[[f64; 3]], weights: Option<&[f64]>) -> GeomResult<Vec3> {
    if points.is_empty() {
        return Err(GeomError::EmptyPointSet);
    }

    let mut sum = [0.0f64; 3];
    let total = match weights {
        Some(w) => {
            validate_weights(w, points.len())?;
            for (p, &wi) in points.iter().zip(w) {
                for k in 0..3 {
                    sum[k] += wi * p[k];
                }
            }
            w.iter().sum::<f64>()
        }
        None => {
            for p in points {
                for k in 0..3 {
                    sum[k] += p[k];
                }
            }
            points.len() as f64
        }
    };

    Ok(Vec3::new(sum[0] / total, sum[1] / total, sum[2] / total))
}

/// Centroid of the points selected by `idxs`.
///
/// `weights` are indexed by position in `idxs`, not by point index.
pub fn centroid_of(
    points: &[[f64; 3]],
    idxs: &[usize],
    weights: Option<&[f64]>,
) -> GeomResult<Vec3> {
    validate_indices(idxs, points.len())?;
    let selected: Vec<[f64; 3]> = idxs.iter().map(|&i| points[i]).collect();
    centroid(&selected, weights)
}
