//! Largest eigenvalue of the QCP key matrix
//!
//! The 4×4 key matrix K built from the cross-sums S is traceless, so its
//! characteristic polynomial is `λ⁴ + C2·λ² + C1·λ + C0`. The largest root
//! is found by Newton-Raphson starting from E0/2, which is an upper bound.
//! K itself is never formed.

use crate::settings::QcpSettings;

use super::inner_product::InnerProduct;

/// Coefficients `(C2, C1, C0)` of the key matrix's characteristic polynomial
pub fn characteristic_coefficients(s: &[f64; 9]) -> (f64, f64, f64) {
    let [sxx, sxy, sxz, syx, syy, syz, szx, szy, szz] = *s;

    let sxx2 = sxx * sxx;
    let syy2 = syy * syy;
    let szz2 = szz * szz;
    let sxy2 = sxy * sxy;
    let syz2 = syz * syz;
    let sxz2 = sxz * sxz;
    let syx2 = syx * syx;
    let szy2 = szy * szy;
    let szx2 = szx * szx;

    let syz_szy_m_syy_szz2 = 2.0 * (syz * szy - syy * szz);
    let sxx2_syy2_szz2_syz2_szy2 = syy2 + szz2 - sxx2 + syz2 + szy2;

    let c2 = -2.0 * (sxx2 + syy2 + szz2 + sxy2 + syx2 + sxz2 + szx2 + syz2 + szy2);
    let c1 = 8.0
        * (sxx * syz * szy + syy * szx * sxz + szz * sxy * syx
            - sxx * syy * szz
            - syz * szx * sxy
            - szy * syx * sxz);

    let sxz_p_szx = sxz + szx;
    let syz_p_szy = syz + szy;
    let sxy_p_syx = sxy + syx;
    let syz_m_szy = syz - szy;
    let sxz_m_szx = sxz - szx;
    let sxy_m_syx = sxy - syx;
    let sxx_p_syy = sxx + syy;
    let sxx_m_syy = sxx - syy;
    let sxy2_sxz2_syx2_szx2 = sxy2 + sxz2 - syx2 - szx2;

    let c0 = sxy2_sxz2_syx2_szx2 * sxy2_sxz2_syx2_szx2
        + (sxx2_syy2_szz2_syz2_szy2 + syz_szy_m_syy_szz2)
            * (sxx2_syy2_szz2_syz2_szy2 - syz_szy_m_syy_szz2)
        + (-sxz_p_szx * syz_m_szy + sxy_m_syx * (sxx_m_syy - szz))
            * (-sxz_m_szx * syz_p_szy + sxy_m_syx * (sxx_m_syy + szz))
        + (-sxz_p_szx * syz_p_szy - sxy_p_syx * (sxx_p_syy - szz))
            * (-sxz_m_szx * syz_m_szy - sxy_p_syx * (sxx_p_syy + szz))
        + (sxy_p_syx * syz_p_szy + sxz_p_szx * (sxx_m_syy + szz))
            * (-sxy_m_syx * syz_m_szy + sxz_p_szx * (sxx_p_syy + szz))
        + (sxy_p_syx * syz_m_szy + sxz_m_szx * (sxx_m_syy - szz))
            * (-sxy_m_syx * syz_p_szy + sxz_m_szx * (sxx_p_syy - szz));

    (c2, c1, c0)
}

/// Outcome of the eigenvalue iteration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EigenSolution {
    pub lambda: f64,
    pub iterations: u32,
    /// False when the iteration budget ran out before the tolerance was met
    pub converged: bool,
}

/// `(P(λ), P'(λ))` for the characteristic polynomial
fn evaluate(c2: f64, c1: f64, c0: f64, lambda: f64) -> (f64, f64) {
    let x2 = lambda * lambda;
    let b = (x2 + c2) * lambda;
    let a = b + c1;
    // P'(λ) = 4λ³ + 2·C2·λ + C1
    (a * lambda + c0, 2.0 * x2 * lambda + b + a)
}

/// Largest eigenvalue of the key matrix for `ip`.
///
/// A degenerate inner product (all cross-sums zero) short-circuits to
/// λ = 0 without iterating.
///
/// Above the top root the polynomial is increasing and convex, so every
/// exact Newton step moves down without overshooting. A step that goes up,
/// drops below `sqrt(-C2 / 6)` (a lower bound on the top root of a
/// traceless 4×4 matrix) or fails to shrink |P| can only come from
/// rounding noise; the iteration stops at the current λ instead. Repeated
/// top roots (collinear or two-point sets) end this way.
pub fn max_eigenvalue(ip: &InnerProduct, settings: &QcpSettings) -> EigenSolution {
    if ip.is_degenerate() {
        return EigenSolution {
            lambda: 0.0,
            iterations: 0,
            converged: true,
        };
    }

    let (c2, c1, c0) = characteristic_coefficients(&ip.matrix);
    let floor = (-c2 / 6.0).max(0.0).sqrt();
    let mut lambda = ip.e0() * 0.5;
    let (mut p, mut derivative) = evaluate(c2, c1, c0, lambda);

    for iteration in 1..=settings.max_iterations {
        if p == 0.0 || derivative <= 0.0 {
            log::debug!("qcp: polynomial flat after {iteration} iterations");
            return EigenSolution {
                lambda,
                iterations: iteration,
                converged: true,
            };
        }

        let next = lambda - p / derivative;
        let (next_p, next_derivative) = evaluate(c2, c1, c0, next);
        // written so that NaN also stops
        let monotone = next <= lambda && next >= floor && next_p.abs() < p.abs();
        if !monotone {
            log::debug!("qcp: stopped at precision limit after {iteration} iterations");
            return EigenSolution {
                lambda,
                iterations: iteration,
                converged: true,
            };
        }

        let step = lambda - next;
        lambda = next;
        p = next_p;
        derivative = next_derivative;

        if step <= (settings.tolerance * lambda).abs() {
            log::debug!("qcp: converged in {iteration} iterations");
            return EigenSolution {
                lambda,
                iterations: iteration,
                converged: true,
            };
        }
    }

    EigenSolution {
        lambda,
        iterations: settings.max_iterations,
        converged: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::{axis_angle_rotation, transform_point};
    use crate::qcp::inner_product::inner_product;
    use lin_alg::f64::Vec3;

    fn polynomial(s: &[f64; 9], lambda: f64) -> f64 {
        let (c2, c1, c0) = characteristic_coefficients(s);
        lambda.powi(4) + c2 * lambda * lambda + c1 * lambda + c0
    }

    #[test]
    fn test_diagonal_cross_sums() {
        // S = diag(1, 2, 3): K is diagonal with entries 6, -4, -2, 0
        let s = [1.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 3.0];
        for root in [6.0, -4.0, -2.0, 0.0] {
            assert!(polynomial(&s, root).abs() < 1e-9, "root {root}");
        }
    }

    #[test]
    fn test_identical_sets_reach_e0_half() {
        let pts = [[1.0, 0.0, 0.0], [-1.0, 0.5, 0.0], [0.0, -0.5, 2.0], [0.0, 0.0, -2.0]];
        let ip = inner_product(&pts, &pts, None);
        let solution = max_eigenvalue(&ip, &QcpSettings::default());
        assert!(solution.converged);
        assert!((solution.lambda - ip.e0() * 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_skips_iteration() {
        let zeros = [[0.0; 3]; 3];
        let ip = inner_product(&zeros, &zeros, None);
        let solution = max_eigenvalue(&ip, &QcpSettings::default());
        assert_eq!(solution.lambda, 0.0);
        assert_eq!(solution.iterations, 0);
        assert!(solution.converged);
    }

    #[test]
    fn test_two_point_root_stays_on_top() {
        // rank-one cross-sums: K has eigenvalues ±σ, each twice
        let a = [[0.75, 0.1, -0.2], [-0.75, -0.1, 0.2]];
        let sigma = 4.0 * (0.75 * 0.75 + 0.01 + 0.04);
        for i in 0..100 {
            let axis = Vec3::new(1.0, 0.3 * i as f64 - 10.0, 0.5);
            let r = axis_angle_rotation(axis, 0.1 * i as f64 + 0.02);
            let b: Vec<[f64; 3]> = a
                .iter()
                .map(|p| transform_point(&r, p).map(|x| 2.0 * x))
                .collect();
            let ip = inner_product(&a, &b, None);
            let solution = max_eigenvalue(&ip, &QcpSettings::default());
            assert!(solution.converged);
            assert!(
                (solution.lambda - sigma).abs() < 1e-6 * sigma,
                "case {i}: {} vs {sigma}",
                solution.lambda
            );
        }
    }

    #[test]
    fn test_budget_exhaustion_is_reported() {
        // collinear sets have a double top root and converge slowly
        let a = [[-1.0, -2.0, -3.0], [0.0, 0.0, 0.0], [1.0, 2.0, 3.0]];
        let b = [[-1.5, 1.5, -0.75], [0.0, 0.0, 0.0], [1.5, -1.5, 0.75]];
        let ip = inner_product(&a, &b, None);
        let settings = QcpSettings {
            max_iterations: 2,
            ..Default::default()
        };
        let solution = max_eigenvalue(&ip, &settings);
        assert!(!solution.converged);
        assert_eq!(solution.iterations, 2);
        assert!(solution.lambda <= ip.e0() * 0.5);
    }
}
