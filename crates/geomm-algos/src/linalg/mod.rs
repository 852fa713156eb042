//! Linear algebra utilities
//!
//! - [`mat3`] - 3×3 row-major rotation helpers (apply, compose, check, build from axis/angle)

pub mod mat3;

pub use mat3::{
    axis_angle_rotation, determinant_3x3, is_identity_3x3, is_proper_rotation, multiply_3x3,
    transform_point, transpose_3x3, IDENTITY_3X3,
};
