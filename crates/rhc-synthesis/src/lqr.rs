// ─────────────────────────────────────────────────────────────────────
// SCPN Control — Nominal Finite-Horizon LQR Baseline
// © 1998–2026 Miroslav Šotek. All rights reserved.
// License: MIT OR Apache-2.0
// ─────────────────────────────────────────────────────────────────────
//! Classical discrete-time finite-horizon LQR via the Riccati
//! recursion, in the same `u = K·x` sign convention as the robust
//! synthesis:
//!
//!   K_i = −(R + Gᵀ P_{i+1} G)⁻¹ Gᵀ P_{i+1} F
//!   P_i = Q + Fᵀ P_{i+1} F + Fᵀ P_{i+1} G · K_i
//!
//! Serves as the independent cross-check for the zero-uncertainty
//! limit of the robust recursion, and as a nominal-design baseline.

use nalgebra::DMatrix;

use rhc_types::{RhcError, RhcResult};

use crate::backend;
use crate::recursion::GainSchedule;

/// Finite-horizon LQR gain schedule for the nominal pair (F, G).
pub fn riccati_schedule(
    f: &DMatrix<f64>,
    g: &DMatrix<f64>,
    q: &DMatrix<f64>,
    r: &DMatrix<f64>,
    p_final: &DMatrix<f64>,
    horizon: usize,
) -> RhcResult<GainSchedule> {
    let n = f.nrows();
    let m = g.ncols();
    if f.ncols() != n || g.nrows() != n {
        return Err(RhcError::DimensionMismatch(format!(
            "F must be square and G row-compatible, got F {}x{}, G {}x{}",
            f.nrows(),
            f.ncols(),
            g.nrows(),
            g.ncols()
        )));
    }
    if q.shape() != (n, n) || r.shape() != (m, m) || p_final.shape() != (n, n) {
        return Err(RhcError::DimensionMismatch(
            "Q, R, P_final must be n×n, m×m, n×n".to_string(),
        ));
    }

    let mut gains = Vec::with_capacity(horizon + 1);
    let mut cost_to_go = Vec::with_capacity(horizon + 2);
    cost_to_go.push(p_final.clone());

    let mut p_next = p_final.clone();
    for back in 0..=horizon {
        let stage = horizon - back;
        let gtp = g.transpose() * &p_next;
        let s = r + &gtp * g;
        let s_inv = backend::invert(&s, stage, "R + GᵀPG")?;
        let k_i = -(&s_inv * &gtp * f);
        let p_i = q + f.transpose() * &p_next * f + f.transpose() * &p_next * g * &k_i;

        gains.push(k_i);
        cost_to_go.push(p_i.clone());
        p_next = p_i;
    }

    gains.reverse();
    cost_to_go.reverse();
    Ok(GainSchedule { gains, cost_to_go })
}
