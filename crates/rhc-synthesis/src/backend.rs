// ─────────────────────────────────────────────────────────────────────
// SCPN Control — Robust RHC Linear-Algebra Adapter
// © 1998–2026 Miroslav Šotek. All rights reserved.
// License: MIT OR Apache-2.0
// ─────────────────────────────────────────────────────────────────────
//! Thin adapter over the dense backend (nalgebra). The recursion talks
//! to these few functions only, and backend failures come back as
//! `SingularSystem` with the stage that hit them.

use nalgebra::DMatrix;

use rhc_types::{RhcError, RhcResult};

/// Invert a square matrix, attributing failure to `stage`.
pub fn invert(a: &DMatrix<f64>, stage: usize, what: &str) -> RhcResult<DMatrix<f64>> {
    a.clone().try_inverse().ok_or_else(|| RhcError::SingularSystem {
        stage,
        detail: format!("{what} is not invertible"),
    })
}

/// Direct LU solve of M·Z = B with a matrix right-hand side.
///
/// A direct solve, not an explicit inversion of M.
pub fn solve(m: DMatrix<f64>, b: DMatrix<f64>, stage: usize) -> RhcResult<DMatrix<f64>> {
    m.lu().solve(&b).ok_or_else(|| RhcError::SingularSystem {
        stage,
        detail: "stage saddle-point matrix is singular".to_string(),
    })
}

/// Spectral (2-)norm via singular values.
pub fn spectral_norm(a: &DMatrix<f64>) -> f64 {
    a.singular_values().max()
}

/// Vertical concatenation of equally wide blocks.
pub fn vstack(blocks: &[&DMatrix<f64>]) -> DMatrix<f64> {
    let cols = blocks[0].ncols();
    let rows: usize = blocks.iter().map(|b| b.nrows()).sum();
    let mut out = DMatrix::zeros(rows, cols);
    let mut r = 0;
    for b in blocks {
        out.view_mut((r, 0), (b.nrows(), cols)).copy_from(*b);
        r += b.nrows();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invert_identity() {
        let inv = invert(&DMatrix::identity(3, 3), 0, "I").unwrap();
        assert_eq!(inv, DMatrix::identity(3, 3));
    }

    #[test]
    fn test_invert_singular_reports_stage() {
        let err = invert(&DMatrix::zeros(2, 2), 7, "R").unwrap_err();
        match err {
            RhcError::SingularSystem { stage, detail } => {
                assert_eq!(stage, 7);
                assert!(detail.contains('R'));
            }
            other => panic!("expected SingularSystem, got {other:?}"),
        }
    }

    #[test]
    fn test_solve_diagonal() {
        let m = DMatrix::from_row_slice(2, 2, &[2.0, 0.0, 0.0, 4.0]);
        let b = DMatrix::from_row_slice(2, 1, &[2.0, 8.0]);
        let z = solve(m, b, 0).unwrap();
        assert!((z[(0, 0)] - 1.0).abs() < 1e-12);
        assert!((z[(1, 0)] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_solve_singular() {
        let m = DMatrix::zeros(2, 2);
        let b = DMatrix::identity(2, 2);
        assert!(matches!(
            solve(m, b, 3),
            Err(RhcError::SingularSystem { stage: 3, .. })
        ));
    }

    #[test]
    fn test_spectral_norm_diag() {
        let a = DMatrix::from_row_slice(2, 2, &[3.0, 0.0, 0.0, -5.0]);
        assert!((spectral_norm(&a) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_vstack() {
        let top = DMatrix::identity(2, 2);
        let bot = DMatrix::zeros(1, 2);
        let s = vstack(&[&top, &bot]);
        assert_eq!(s.shape(), (3, 2));
        assert_eq!(s[(0, 0)], 1.0);
        assert_eq!(s[(2, 0)], 0.0);
    }
}
