//! Translating point sets and centering them on reference points
//!
//! All functions return new coordinates; inputs are never modified.

use lin_alg::f64::Vec3;

use crate::centroid::{centroid, centroid_of};
use crate::error::{GeomError, GeomResult};
use crate::selection::validate_indices;

/// Translate every point by `delta`
pub fn translate(points: &[[f64; 3]], delta: Vec3) -> Vec<[f64; 3]> {
    points
        .iter()
        .map(|p| [p[0] + delta.x, p[1] + delta.y, p[2] + delta.z])
        .collect()
}

/// Move `center_point` to the origin, carrying every point along
pub fn center(points: &[[f64; 3]], center_point: Vec3) -> Vec<[f64; 3]> {
    translate(
        points,
        Vec3::new(-center_point.x, -center_point.y, -center_point.z),
    )
}

/// Center all points on the (optionally weighted) centroid of a subset.
///
/// The centroid is computed from `idxs` only, but the translation is applied
/// to every point. `weights` are indexed by position in `idxs`.
pub fn center_around(
    points: &[[f64; 3]],
    idxs: &[usize],
    weights: Option<&[f64]>,
) -> GeomResult<Vec<[f64; 3]>> {
    if idxs.is_empty() {
        return Err(GeomError::EmptyPointSet);
    }
    let c = centroid_of(points, idxs, weights)?;
    Ok(center(points, c))
}

/// Center a point set on a complex made of several members.
///
/// Each member is a list of point indices. The new origin is the mean of
/// the member centroids, so every member counts equally regardless of size.
pub fn center_complex(points: &[[f64; 3]], members: &[&[usize]]) -> GeomResult<Vec<[f64; 3]>> {
    if members.is_empty() {
        return Err(GeomError::EmptyPointSet);
    }

    let mut sum = Vec3::new_zero();
    for member in members {
        validate_indices(member, points.len())?;
        let selected: Vec<[f64; 3]> = member.iter().map(|&i| points[i]).collect();
        sum = sum + centroid(&selected, None)?;
    }
    let complex_centroid = sum * (1.0 / members.len() as f64);

    Ok(center(points, complex_centroid))
}
