//! Weighted cross-sum matrix of two centered point sets

/// Cross-sums and self inner products of a reference/mobile pair.
///
/// `matrix` is row-major with `matrix[3 * a + b] = Σ w · ref[a] · mob[b]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InnerProduct {
    pub matrix: [f64; 9],
    /// Σ w · |ref|²
    pub g_reference: f64,
    /// Σ w · |mob|²
    pub g_mobile: f64,
}

impl InnerProduct {
    /// Sum of both self inner products; the upper bound on 2λ
    pub fn e0(&self) -> f64 {
        self.g_reference + self.g_mobile
    }

    /// Every cross-sum is zero relative to the magnitude of the inputs.
    ///
    /// The key matrix is then zero, so λ_max = 0 and any rotation is
    /// optimal. Two empty-extent sets (all points at the origin) land here.
    pub fn is_degenerate(&self) -> bool {
        let max_abs = self.matrix.iter().fold(0.0f64, |acc, s| acc.max(s.abs()));
        max_abs == 0.0 || max_abs <= f64::EPSILON * self.e0()
    }
}

/// Accumulate the inner product of two equally long, centered point sets.
///
/// Lengths and weights must already be validated.
pub fn inner_product(
    reference: &[[f64; 3]],
    mobile: &[[f64; 3]],
    weights: Option<&[f64]>,
) -> InnerProduct {
    let mut matrix = [0.0f64; 9];
    let mut g_reference = 0.0;
    let mut g_mobile = 0.0;

    for (i, (a, b)) in reference.iter().zip(mobile).enumerate() {
        let w = weights.map_or(1.0, |w| w[i]);
        g_reference += w * (a[0] * a[0] + a[1] * a[1] + a[2] * a[2]);
        g_mobile += w * (b[0] * b[0] + b[1] * b[1] + b[2] * b[2]);
        for row in 0..3 {
            let wa = w * a[row];
            for col in 0..3 {
                matrix[row * 3 + col] += wa * b[col];
            }
        }
    }

    InnerProduct {
        matrix,
        g_reference,
        g_mobile,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unweighted_sums() {
        let a = [[1.0, 0.0, 0.0], [0.0, 2.0, 0.0]];
        let b = [[0.0, 1.0, 0.0], [0.0, 0.0, 3.0]];
        let ip = inner_product(&a, &b, None);
        assert_eq!(ip.g_reference, 5.0);
        assert_eq!(ip.g_mobile, 10.0);
        assert_eq!(ip.e0(), 15.0);
        // S_xy from point 0, S_yz from point 1
        assert_eq!(ip.matrix, [0.0, 1.0, 0.0, 0.0, 0.0, 6.0, 0.0, 0.0, 0.0]);
        assert!(!ip.is_degenerate());
    }

    #[test]
    fn test_weights_scale_contributions() {
        let a = [[1.0, 0.0, 0.0], [-1.0, 0.0, 0.0]];
        let ip = inner_product(&a, &a, Some(&[3.0, 0.0]));
        assert_eq!(ip.matrix[0], 3.0);
        assert_eq!(ip.g_reference, 3.0);
    }

    #[test]
    fn test_orthogonal_sets_are_degenerate() {
        // every cross product vanishes although both sets have extent
        let a = [[1.0, 0.0, 0.0], [-1.0, 0.0, 0.0]];
        let b = [[0.0, 0.0, 0.0], [0.0, 0.0, 0.0]];
        assert!(inner_product(&a, &b, None).is_degenerate());
        assert!(inner_product(&b, &b, None).is_degenerate());
    }
}
