// ─────────────────────────────────────────────────────────────────────
// SCPN Control — Robust RHC Quadratic Weights
// © 1998–2026 Miroslav Šotek. All rights reserved.
// License: MIT OR Apache-2.0
// ─────────────────────────────────────────────────────────────────────

use nalgebra::DMatrix;

use crate::error::{RhcError, RhcResult};
use crate::plant::UncertainPlant;

/// Quadratic stage and terminal weights (Q, R, P_final).
///
/// Only shapes and finiteness are validated here. Invertibility is a
/// property of the numbers, not the shapes, so a singular weight
/// surfaces as `SingularSystem` at the first stage that inverts it.
#[derive(Debug, Clone)]
pub struct QuadraticCost {
    /// State-cost weight Q (n×n).
    pub q: DMatrix<f64>,
    /// Input-cost weight R (m×m).
    pub r: DMatrix<f64>,
    /// Terminal cost-to-go P_final (n×n).
    pub p_final: DMatrix<f64>,
}

impl QuadraticCost {
    pub fn new(
        q: DMatrix<f64>,
        r: DMatrix<f64>,
        p_final: DMatrix<f64>,
    ) -> RhcResult<Self> {
        if q.nrows() != q.ncols() {
            return Err(RhcError::DimensionMismatch(format!(
                "Q must be square, got {}x{}",
                q.nrows(),
                q.ncols()
            )));
        }
        if r.nrows() != r.ncols() {
            return Err(RhcError::DimensionMismatch(format!(
                "R must be square, got {}x{}",
                r.nrows(),
                r.ncols()
            )));
        }
        if p_final.nrows() != q.nrows() || p_final.ncols() != q.ncols() {
            return Err(RhcError::DimensionMismatch(format!(
                "P_final must match Q ({0}x{0}), got {1}x{2}",
                q.nrows(),
                p_final.nrows(),
                p_final.ncols()
            )));
        }
        if q.iter().any(|v| !v.is_finite())
            || r.iter().any(|v| !v.is_finite())
            || p_final.iter().any(|v| !v.is_finite())
        {
            return Err(RhcError::Numerical(
                "weighting matrices must be finite".to_string(),
            ));
        }
        Ok(Self { q, r, p_final })
    }

    /// Identity weights: Q = P_final = I_n, R = I_m.
    pub fn identity(n: usize, m: usize) -> Self {
        Self {
            q: DMatrix::identity(n, n),
            r: DMatrix::identity(m, m),
            p_final: DMatrix::identity(n, n),
        }
    }

    /// Check dimension agreement against a plant.
    pub fn check_dims(&self, plant: &UncertainPlant) -> RhcResult<()> {
        let n = plant.n_states();
        let m = plant.n_inputs();
        if self.q.nrows() != n {
            return Err(RhcError::DimensionMismatch(format!(
                "Q is {}x{} but the plant has n = {n} states",
                self.q.nrows(),
                self.q.ncols()
            )));
        }
        if self.r.nrows() != m {
            return Err(RhcError::DimensionMismatch(format!(
                "R is {}x{} but the plant has m = {m} inputs",
                self.r.nrows(),
                self.r.ncols()
            )));
        }
        Ok(())
    }
}
