//! Direct RMSD between two coordinate sets, without any alignment

use crate::error::{GeomError, GeomResult};
use crate::selection::{check_len, validate_indices};

/// RMSD between `reference` and `coords` as given.
///
/// If `idxs` is given only those points contribute, and the divisor is the
/// subset length. Nothing is centered or rotated.
pub fn calc_rmsd(
    reference: &[[f64; 3]],
    coords: &[[f64; 3]],
    idxs: Option<&[usize]>,
) -> GeomResult<f64> {
    check_len("coordinate count", reference.len(), coords.len())?;

    let sum_sq = |i: usize| -> f64 {
        let a = reference[i];
        let b = coords[i];
        let dx = a[0] - b[0];
        let dy = a[1] - b[1];
        let dz = a[2] - b[2];
        dx * dx + dy * dy + dz * dz
    };

    let (total, n) = match idxs {
        Some(idxs) => {
            validate_indices(idxs, reference.len())?;
            (idxs.iter().map(|&i| sum_sq(i)).sum::<f64>(), idxs.len())
        }
        None => ((0..reference.len()).map(sum_sq).sum::<f64>(), reference.len()),
    };

    if n == 0 {
        return Err(GeomError::EmptyPointSet);
    }
    Ok((total / n as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    const REF: [[f64; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];

    #[test]
    fn test_identical_coords() {
        assert_eq!(calc_rmsd(&REF, &REF, None).unwrap(), 0.0);
    }

    #[test]
    fn test_simple_translation() {
        let coords: Vec<[f64; 3]> = REF.iter().map(|p| [p[0] + 1.0, p[1] + 1.0, p[2] + 1.0]).collect();
        // every point moves by sqrt(3)
        let r = calc_rmsd(&REF, &coords, None).unwrap();
        assert!((r - 3f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_with_idxs() {
        let coords = [[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.0, 0.0]];
        let r = calc_rmsd(&REF, &coords, Some(&[1, 2])).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
        // point 0 is unchanged and pulls the full-set RMSD down
        let full = calc_rmsd(&REF, &coords, None).unwrap();
        assert!((full - (2.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_shape_mismatch() {
        let coords = [[0.0; 3]; 4];
        assert!(matches!(
            calc_rmsd(&REF, &coords, None),
            Err(GeomError::ShapeMismatch { expected: 3, actual: 4, .. })
        ));
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(calc_rmsd(&[], &[], None).unwrap_err(), GeomError::EmptyPointSet);
        assert_eq!(
            calc_rmsd(&REF, &REF, Some(&[])).unwrap_err(),
            GeomError::EmptyPointSet
        );
    }
}
