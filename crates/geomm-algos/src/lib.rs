//! Optimal rigid-body superposition for geomm-rs
//!
//! This crate finds the rotation that best overlays one point set onto
//! another and reports the resulting RMSD:
//! - Theobald QCP: largest eigenvalue of the quaternion key matrix by
//!   Newton-Raphson on its characteristic polynomial, no SVD or generic
//!   eigen-solver
//! - Rotation recovered algebraically from the eigenvalue via cofactors
//! - Centering + rotation + translation back onto the reference ([`superimpose`])
//! - Parallel per-frame superposition of trajectories ([`superimpose_frames`])
//!
//! Coordinate-level helpers (centroids, periodic boxes, direct RMSD) live
//! in `geomm-coords`.

pub mod linalg;
pub mod qcp;
mod settings;
mod superimpose;
mod trajectory;

pub use qcp::{theobald_qcp, AlignmentQuality, QcpResult};
pub use settings::{QcpSettings, SuperimposeParams};
pub use superimpose::{superimpose, superimpose_with, Superposition};
pub use trajectory::{superimpose_frames, superimpose_frames_cancellable};

use geomm_coords::GeomError;

/// Errors from alignment algorithms
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AlignError {
    /// Invalid point sets, indices or weights
    #[error(transparent)]
    Geom(#[from] GeomError),

    /// A trajectory frame failed validation
    #[error("Frame {index}: {source}")]
    Frame { index: usize, source: GeomError },

    #[error("Batch superposition was cancelled")]
    Cancelled,

    #[error("Invalid QCP settings: {0}")]
    InvalidSettings(String),
}

/// Result type for alignment operations
pub type AlignResult<T> = Result<T, AlignError>;
