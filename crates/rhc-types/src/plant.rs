// ─────────────────────────────────────────────────────────────────────
// SCPN Control — Robust RHC Uncertain Plant
// © 1998–2026 Miroslav Šotek. All rights reserved.
// License: MIT OR Apache-2.0
// ─────────────────────────────────────────────────────────────────────
//! Discrete-time plant with a single norm-bounded uncertainty channel:
//!
//!   x_{i+1} = (F + H δ_i Ef) x_i + (G + H δ_i Eg) u_i,   |δ_i| ≤ 1
//!
//! All shape constraints are checked eagerly at construction so the
//! recursion never starts on inconsistent data.

use nalgebra::DMatrix;

use crate::error::{RhcError, RhcResult};

/// Uncertain plant description: nominal (F, G) plus channel (H, Ef, Eg).
#[derive(Debug, Clone)]
pub struct UncertainPlant {
    /// State transition matrix F (n×n).
    pub f: DMatrix<f64>,
    /// Input matrix G (n×m).
    pub g: DMatrix<f64>,
    /// Uncertainty channel matrix H (n×l).
    pub h: DMatrix<f64>,
    /// Uncertainty-state coupling Ef (l×n).
    pub ef: DMatrix<f64>,
    /// Uncertainty-input coupling Eg (l×m).
    pub eg: DMatrix<f64>,
}

impl UncertainPlant {
    /// Create a plant and validate every matrix shape against (n, m, l).
    pub fn new(
        f: DMatrix<f64>,
        g: DMatrix<f64>,
        h: DMatrix<f64>,
        ef: DMatrix<f64>,
        eg: DMatrix<f64>,
    ) -> RhcResult<Self> {
        let n = f.nrows();
        if n == 0 || f.ncols() != n {
            return Err(RhcError::DimensionMismatch(format!(
                "F must be square with n > 0, got {}x{}",
                f.nrows(),
                f.ncols()
            )));
        }
        let m = g.ncols();
        if m == 0 || g.nrows() != n {
            return Err(RhcError::DimensionMismatch(format!(
                "G must be {n}xm with m > 0, got {}x{}",
                g.nrows(),
                g.ncols()
            )));
        }
        let l = h.ncols();
        if l == 0 || h.nrows() != n {
            return Err(RhcError::DimensionMismatch(format!(
                "H must be {n}xl with l > 0, got {}x{}",
                h.nrows(),
                h.ncols()
            )));
        }
        if ef.nrows() != l || ef.ncols() != n {
            return Err(RhcError::DimensionMismatch(format!(
                "Ef must be {l}x{n}, got {}x{}",
                ef.nrows(),
                ef.ncols()
            )));
        }
        if eg.nrows() != l || eg.ncols() != m {
            return Err(RhcError::DimensionMismatch(format!(
                "Eg must be {l}x{m}, got {}x{}",
                eg.nrows(),
                eg.ncols()
            )));
        }

        if f.iter().any(|v| !v.is_finite())
            || g.iter().any(|v| !v.is_finite())
            || h.iter().any(|v| !v.is_finite())
            || ef.iter().any(|v| !v.is_finite())
            || eg.iter().any(|v| !v.is_finite())
        {
            return Err(RhcError::Numerical(
                "plant matrices must be finite".to_string(),
            ));
        }

        Ok(Self { f, g, h, ef, eg })
    }

    /// Nominal plant without model uncertainty: zero channel with l = 1.
    pub fn nominal(f: DMatrix<f64>, g: DMatrix<f64>) -> RhcResult<Self> {
        let n = f.nrows();
        let m = g.ncols();
        Self::new(
            f,
            g,
            DMatrix::zeros(n, 1),
            DMatrix::zeros(1, n),
            DMatrix::zeros(1, m),
        )
    }

    /// State dimension n.
    pub fn n_states(&self) -> usize {
        self.f.nrows()
    }

    /// Input dimension m.
    pub fn n_inputs(&self) -> usize {
        self.g.ncols()
    }

    /// Uncertainty dimension l (columns of H).
    pub fn n_uncertainty(&self) -> usize {
        self.h.ncols()
    }

    /// Realized (F_i, G_i) for a concrete uncertainty draw δ.
    pub fn realized(&self, delta: f64) -> (DMatrix<f64>, DMatrix<f64>) {
        let fi = &self.f + &self.h * delta * &self.ef;
        let gi = &self.g + &self.h * delta * &self.eg;
        (fi, gi)
    }
}
