//! Precondition checks for point sets, index subsets and weights

use crate::error::{GeomError, GeomResult};

/// Fail with `ShapeMismatch` unless `actual == expected`
pub fn check_len(what: &'static str, expected: usize, actual: usize) -> GeomResult<()> {
    if expected != actual {
        return Err(GeomError::shape_mismatch(what, expected, actual));
    }
    Ok(())
}

/// Validate an index subset against a point count.
///
/// Indices need not be sorted, but each must be in `[0, len)` and appear once.
pub fn validate_indices(idxs: &[usize], len: usize) -> GeomResult<()> {
    let mut seen = vec![false; len];
    for &idx in idxs {
        if idx >= len {
            return Err(GeomError::IndexOutOfRange { index: idx, len });
        }
        if seen[idx] {
            return Err(GeomError::DuplicateIndex(idx));
        }
        seen[idx] = true;
    }
    Ok(())
}

/// Validate a weight vector: expected length, finite, non-negative, non-zero total
pub fn validate_weights(weights: &[f64], expected: usize) -> GeomResult<()> {
    check_len("weights", expected, weights.len())?;
    let mut total = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        if !w.is_finite() || w < 0.0 {
            return Err(GeomError::InvalidWeights(format!(
                "weight {i} is {w}, expected a finite non-negative value"
            )));
        }
        total += w;
    }
    if total <= 0.0 {
        return Err(GeomError::InvalidWeights("weights sum to zero".into()));
    }
    Ok(())
}

/// Copy the selected points, in selection order.
///
/// Indices must already be validated against `points.len()`.
pub fn gather(points: &[[f64; 3]], idxs: &[usize]) -> Vec<[f64; 3]> {
    idxs.iter().map(|&i| points[i]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_indices_ok_unsorted() {
        assert!(validate_indices(&[3, 0, 2], 4).is_ok());
        assert!(validate_indices(&[], 4).is_ok());
    }

    #[test]
    fn test_validate_indices_out_of_range() {
        let err = validate_indices(&[0, 4], 4).unwrap_err();
        assert_eq!(err, GeomError::IndexOutOfRange { index: 4, len: 4 });
    }

    #[test]
    fn test_validate_indices_duplicate() {
        let err = validate_indices(&[1, 2, 1], 4).unwrap_err();
        assert_eq!(err, GeomError::DuplicateIndex(1));
    }

    #[test]
    fn test_validate_weights() {
        assert!(validate_weights(&[1.0, 0.0, 12.011], 3).is_ok());
        assert!(matches!(
            validate_weights(&[1.0, 2.0], 3),
            Err(GeomError::ShapeMismatch { expected: 3, actual: 2, .. })
        ));
        assert!(matches!(
            validate_weights(&[1.0, -2.0], 2),
            Err(GeomError::InvalidWeights(_))
        ));
        assert!(matches!(
            validate_weights(&[0.0, 0.0], 2),
            Err(GeomError::InvalidWeights(_))
        ));
        assert!(matches!(
            validate_weights(&[1.0, f64::NAN], 2),
            Err(GeomError::InvalidWeights(_))
        ));
    }

    #[test]
    fn test_gather_keeps_selection_order() {
        let points = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]];
        let picked = gather(&points, &[2, 0]);
        assert_eq!(picked, vec![[2.0, 0.0, 0.0], [0.0, 0.0, 0.0]]);
    }
}
