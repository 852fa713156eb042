//! Point-set utilities for geomm-rs
//!
//! This crate provides the coordinate-level building blocks used by the
//! alignment core in `geomm-algos`:
//!
//! - [`centroid`] / [`centroid_of`] - Plain and weighted centroids (center of mass)
//! - [`center`], [`center_around`], [`center_complex`] - Translating point sets onto reference points
//! - [`PeriodicBox`], [`apply_rectangular_pbcs`], [`group_pair`] - Orthorhombic periodic re-imaging
//! - [`box_vectors_to_lengths_angles`] - Unit cell vector ↔ lengths/angles conversion
//! - [`calc_rmsd`] - RMSD of two sets as given, without alignment
//! - [`minimum_distance`] - Closest approach of two sets via a spatial hash
//!
//! # Conventions
//!
//! - A point set is a slice of `[f64; 3]`.
//! - An index subset selects points by position; indices must be in range
//!   and distinct, but need not be sorted.
//! - Weights, when given alongside a subset, are indexed by position in the
//!   subset.
//! - Nothing mutates its input; every transform returns new coordinates.
//!
//! # Example
//!
//! ```rust
//! use geomm_coords::{center_around, PeriodicBox, apply_rectangular_pbcs};
//!
//! let points = [[1.0, 0.0, 0.0], [3.0, 0.0, 0.0], [9.0, 0.0, 0.0]];
//! let centered = center_around(&points, &[0, 1], None).unwrap();
//! assert_eq!(centered[2], [7.0, 0.0, 0.0]);
//!
//! let cell = PeriodicBox::cubic(10.0).unwrap();
//! let wrapped = apply_rectangular_pbcs(&centered, &cell, [0.0; 3]);
//! assert_eq!(wrapped[2], [-3.0, 0.0, 0.0]);
//! ```

mod box_vectors;
mod centering;
mod centroid;
mod distance;
mod error;
mod pbc;
mod rmsd;
pub mod selection;
mod spatial;

pub use box_vectors::{box_vectors_to_lengths_angles, lengths_angles_to_box_vectors, BoxGeometry};
pub use centering::{center, center_around, center_complex, translate};
pub use centroid::{centroid, centroid_of};
pub use distance::minimum_distance;
pub use error::{GeomError, GeomResult};
pub use pbc::{apply_rectangular_pbcs, group_pair, group_pair_frames, recenter_pair, PeriodicBox};
pub use rmsd::calc_rmsd;

// Re-export for downstream crates that pass centroids around
pub use lin_alg::f64::Vec3;
