//! Rectangular periodic boundary conditions
//!
//! These helpers re-image coordinates in an orthorhombic unit cell. They do
//! not know about molecular topology: wrapping individual coordinates can
//! split bonded atoms across the box, which is what [`group_pair`] repairs
//! for a pair of members (e.g. protein and ligand).

use lin_alg::f64::Vec3;
use serde::{Deserialize, Serialize};

use crate::centering::{center_complex, translate};
use crate::centroid::centroid;
use crate::error::{GeomError, GeomResult};
use crate::selection::{check_len, gather, validate_indices};

/// Side lengths of an orthorhombic periodic cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodicBox {
    lengths: [f64; 3],
}

impl PeriodicBox {
    /// Create a box; every side must be positive and finite
    pub fn new(lengths: [f64; 3]) -> GeomResult<Self> {
        for (axis, &len) in lengths.iter().enumerate() {
            if !len.is_finite() || len <= 0.0 {
                return Err(GeomError::InvalidBox(format!(
                    "side {axis} has length {len}"
                )));
            }
        }
        Ok(PeriodicBox { lengths })
    }

    /// Cubic box with the given side
    pub fn cubic(side: f64) -> GeomResult<Self> {
        Self::new([side; 3])
    }

    pub fn lengths(&self) -> [f64; 3] {
        self.lengths
    }

    pub fn half_lengths(&self) -> [f64; 3] {
        [
            self.lengths[0] * 0.5,
            self.lengths[1] * 0.5,
            self.lengths[2] * 0.5,
        ]
    }
}

/// Wrap coordinates into the box centered at `center_point`.
///
/// A coordinate more than half a box length above the center is shifted
/// down by one box length; one more than half a box length below is shifted
/// up. Only a single image shift is applied, so points further than 1.5 box
/// lengths from the center stay outside.
pub fn apply_rectangular_pbcs(
    points: &[[f64; 3]],
    cell: &PeriodicBox,
    center_point: [f64; 3],
) -> Vec<[f64; 3]> {
    let lengths = cell.lengths();
    let half = cell.half_lengths();
    points
        .iter()
        .map(|p| {
            let mut wrapped = *p;
            for k in 0..3 {
                if p[k] > center_point[k] + half[k] {
                    wrapped[k] -= lengths[k];
                } else if p[k] < center_point[k] - half[k] {
                    wrapped[k] += lengths[k];
                }
            }
            wrapped
        })
        .collect()
}

/// Move member B to the periodic image closest to member A.
///
/// The comparison uses the unweighted centroids of the two members. On each
/// axis where they are more than half a box length apart, every point of
/// member B shifts by one box length toward A. Member A and points outside
/// both members are left untouched.
pub fn group_pair(
    points: &[[f64; 3]],
    cell: &PeriodicBox,
    member_a: &[usize],
    member_b: &[usize],
) -> GeomResult<Vec<[f64; 3]>> {
    validate_indices(member_a, points.len())?;
    validate_indices(member_b, points.len())?;

    let a_centroid = centroid(&gather(points, member_a), None)?;
    let b_centroid = centroid(&gather(points, member_b), None)?;
    let diff = [
        a_centroid.x - b_centroid.x,
        a_centroid.y - b_centroid.y,
        a_centroid.z - b_centroid.z,
    ];

    let lengths = cell.lengths();
    let half = cell.half_lengths();
    let mut shift = [0.0f64; 3];
    for k in 0..3 {
        if diff[k] > half[k] {
            shift[k] = lengths[k];
        } else if diff[k] < -half[k] {
            shift[k] = -lengths[k];
        }
    }

    let mut grouped = points.to_vec();
    if shift != [0.0; 3] {
        log::debug!("group_pair: shifting {} points by {:?}", member_b.len(), shift);
        for &i in member_b {
            for k in 0..3 {
                grouped[i][k] += shift[k];
            }
        }
    }
    Ok(grouped)
}

/// Apply [`group_pair`] to every frame of a trajectory, each with its own box
pub fn group_pair_frames(
    frames: &[Vec<[f64; 3]>],
    cells: &[PeriodicBox],
    member_a: &[usize],
    member_b: &[usize],
) -> GeomResult<Vec<Vec<[f64; 3]>>> {
    check_len("periodic boxes per frame", frames.len(), cells.len())?;
    frames
        .iter()
        .zip(cells)
        .map(|(frame, cell)| group_pair(frame, cell, member_a, member_b))
        .collect()
}

/// Group a pair into the same image, move the pair to `new_box_center` and
/// re-image every point into the box around that center.
///
/// The pair center is the mean of the two member centroids.
pub fn recenter_pair(
    points: &[[f64; 3]],
    cell: &PeriodicBox,
    member_a: &[usize],
    member_b: &[usize],
    new_box_center: [f64; 3],
) -> GeomResult<Vec<[f64; 3]>> {
    let grouped = group_pair(points, cell, member_a, member_b)?;
    let centered = center_complex(&grouped, &[member_a, member_b])?;
    let [x, y, z] = new_box_center;
    let moved = translate(&centered, Vec3::new(x, y, z));
    Ok(apply_rectangular_pbcs(&moved, cell, new_box_center))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_points_eq(a: &[[f64; 3]], b: &[[f64; 3]]) {
        assert_eq!(a.len(), b.len());
        for (p, q) in a.iter().zip(b) {
            for k in 0..3 {
                assert!((p[k] - q[k]).abs() < 1e-12, "{p:?} vs {q:?}");
            }
        }
    }

    fn box10() -> PeriodicBox {
        PeriodicBox::cubic(10.0).unwrap()
    }

    #[test]
    fn test_invalid_box() {
        assert!(matches!(
            PeriodicBox::new([10.0, 0.0, 10.0]),
            Err(GeomError::InvalidBox(_))
        ));
        assert!(PeriodicBox::new([10.0, f64::INFINITY, 10.0]).is_err());
    }

    #[test]
    fn test_wrap_default_center() {
        let points = [[6.0, -7.0, 1.0], [4.9, -4.9, 0.0]];
        let wrapped = apply_rectangular_pbcs(&points, &box10(), [0.0; 3]);
        assert_points_eq(&wrapped, &[[-4.0, 3.0, 1.0], [4.9, -4.9, 0.0]]);
    }

    #[test]
    fn test_wrap_shifted_center() {
        // Box spanning [0, 10) on every axis
        let points = [[11.0, -1.0, 5.0]];
        let wrapped = apply_rectangular_pbcs(&points, &box10(), [5.0, 5.0, 5.0]);
        assert_points_eq(&wrapped, &[[1.0, 9.0, 5.0]]);
    }

    #[test]
    fn test_group_pair_no_shift() {
        let points = [[1.0, 1.0, 1.0], [2.0, 2.0, 2.0]];
        let grouped = group_pair(&points, &box10(), &[0], &[1]).unwrap();
        assert_points_eq(&grouped, &points);
    }

    #[test]
    fn test_group_pair_positive_shift() {
        let points = [[1.0, 1.0, 1.0], [-8.0, 1.0, 1.0]];
        let grouped = group_pair(&points, &box10(), &[0], &[1]).unwrap();
        assert_points_eq(&grouped, &[[1.0, 1.0, 1.0], [2.0, 1.0, 1.0]]);
    }

    #[test]
    fn test_group_pair_negative_shift() {
        let points = [[1.0, 0.0, 1.0], [1.0, 8.0, 1.0]];
        let grouped = group_pair(&points, &box10(), &[0], &[1]).unwrap();
        assert_points_eq(&grouped, &[[1.0, 0.0, 1.0], [1.0, -2.0, 1.0]]);
    }

    #[test]
    fn test_group_pair_multiple_axes() {
        let points = [[1.0, 1.0, 8.0], [8.0, 1.0, 1.0]];
        let grouped = group_pair(&points, &box10(), &[0], &[1]).unwrap();
        assert_points_eq(&grouped, &[[1.0, 1.0, 8.0], [-2.0, 1.0, 11.0]]);
    }

    #[test]
    fn test_group_pair_multiple_points_per_member() {
        let points = [
            [1.0, 1.0, 1.0],
            [1.0, 2.0, 1.0],
            [8.0, 1.0, 1.0],
            [8.0, 2.0, 1.0],
        ];
        let grouped = group_pair(&points, &box10(), &[0, 1], &[2, 3]).unwrap();
        assert_points_eq(
            &grouped,
            &[
                [1.0, 1.0, 1.0],
                [1.0, 2.0, 1.0],
                [-2.0, 1.0, 1.0],
                [-2.0, 2.0, 1.0],
            ],
        );
    }

    #[test]
    fn test_group_pair_bad_index() {
        let points = [[1.0, 1.0, 1.0], [2.0, 2.0, 2.0]];
        assert!(matches!(
            group_pair(&points, &box10(), &[0], &[2]),
            Err(GeomError::IndexOutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn test_group_pair_frames_needs_one_box_per_frame() {
        let frames = vec![vec![[1.0, 1.0, 1.0], [-8.0, 1.0, 1.0]]; 2];
        let grouped = group_pair_frames(&frames, &[box10(), box10()], &[0], &[1]).unwrap();
        assert_eq!(grouped.len(), 2);
        assert_points_eq(&grouped[1], &[[1.0, 1.0, 1.0], [2.0, 1.0, 1.0]]);

        assert!(matches!(
            group_pair_frames(&frames, &[box10()], &[0], &[1]),
            Err(GeomError::ShapeMismatch { expected: 2, actual: 1, .. })
        ));
    }

    #[test]
    fn test_recenter_pair() {
        let points = [
            [1.0, 1.0, 1.0],
            [-8.0, 1.0, 1.0],
            [4.0, 4.0, 4.0],
            [-4.0, 1.0, 1.0],
        ];
        let recentered = recenter_pair(&points, &box10(), &[0], &[1], [0.0; 3]).unwrap();
        // after grouping member B sits at x=2, so the pair center is (1.5, 1, 1);
        // the last point lands at x=-5.5 and wraps to the other face
        assert_points_eq(
            &recentered,
            &[[-0.5, 0.0, 0.0], [0.5, 0.0, 0.0], [2.5, 3.0, 3.0], [4.5, 0.0, 0.0]],
        );
    }

    #[test]
    fn test_recenter_pair_new_box_center() {
        let points = [
            [1.0, 1.0, 1.0],
            [-8.0, 1.0, 1.0],
            [4.0, 4.0, 4.0],
            [-4.0, 1.0, 1.0],
        ];
        // box spanning [0, 10) on every axis
        let recentered = recenter_pair(&points, &box10(), &[0], &[1], [5.0; 3]).unwrap();
        assert_points_eq(
            &recentered,
            &[[4.5, 5.0, 5.0], [5.5, 5.0, 5.0], [7.5, 8.0, 8.0], [9.5, 5.0, 5.0]],
        );
    }
}
