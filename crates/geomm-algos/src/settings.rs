//! Tunable parameters for the QCP solver and superposition
//!
//! Both structs deserialize with `#[serde(default)]`, so a JSON object only
//! needs the fields it wants to override.

use serde::{Deserialize, Serialize};

use crate::{AlignError, AlignResult};

/// Numerical settings for the eigenvalue and rotation steps
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QcpSettings {
    /// Newton-Raphson stops once |Δλ| ≤ tolerance · |λ|
    pub tolerance: f64,
    /// Iteration budget; running out is reported, not an error
    pub max_iterations: u32,
    /// Cofactor rows with norm ≤ precision · s³ count as degenerate
    /// (s = largest entry of K − λI)
    pub eigenvector_precision: f64,
}

impl Default for QcpSettings {
    fn default() -> Self {
        Self {
            tolerance: 1e-11,
            max_iterations: 50,
            eigenvector_precision: 1e-6,
        }
    }
}

impl QcpSettings {
    /// Reject settings the solver cannot run with
    pub fn validate(&self) -> AlignResult<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(AlignError::InvalidSettings(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(AlignError::InvalidSettings(
                "max_iterations must be at least 1".into(),
            ));
        }
        if !self.eigenvector_precision.is_finite() || self.eigenvector_precision <= 0.0 {
            return Err(AlignError::InvalidSettings(format!(
                "eigenvector_precision must be positive and finite, got {}",
                self.eigenvector_precision
            )));
        }
        Ok(())
    }
}

/// Parameters for [`crate::superimpose_with`]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SuperimposeParams {
    /// Both inputs are already centered on their (weighted) centroids;
    /// skip the centering step
    pub centered: bool,
    pub qcp: QcpSettings,
}
