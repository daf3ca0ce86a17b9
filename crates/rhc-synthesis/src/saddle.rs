// ─────────────────────────────────────────────────────────────────────
// SCPN Control — Robust RHC Saddle-Point Stage System
// © 1998–2026 Miroslav Šotek. All rights reserved.
// License: MIT OR Apache-2.0
// ─────────────────────────────────────────────────────────────────────
//! Augmented linear system encoding the one-stage robust min-max
//! optimality conditions.
//!
//! Unknowns Z are partitioned into six row blocks of heights
//! [n, m, n, n+l, n, m] (total 4n + 2m + l), matching the six row
//! blocks of the system matrix M:
//!
//!   1  state residual        P⁻¹·Z₁ + Z₅                 = 0
//!   2  input residual        R⁻¹·Z₂ + Z₆                 = 0
//!   3  disturbance cost      Q⁻¹·Z₃                      = −I
//!   4  uncertainty coupling  Σ·Z₄ + cal_I·Z₅ − cal_G·Z₆  = cal_F
//!   5  adjoint state         Z₁ + cal_Iᵀ·Z₄              = 0
//!   6  adjoint input         Z₂ − cal_Gᵀ·Z₄              = 0
//!
//! with the stacked channel matrices
//!
//!   cal_I = [I_n; 0],  cal_G = [G; Eg],  cal_F = [F; Ef]
//!
//! and the block-diagonal uncertainty weighting
//!
//!   Σ = diag(S11, S22),  S11 = (1/μ)I_n − (1/λ)HHᵀ,  S22 = (1/λ)I_l.
//!
//! The stage gain is Z₆ and the cost-to-go update term is Z₄:
//! P_i = Q + cal_Fᵀ·Z₄. Every offset is derived from (n, m, l); no
//! block position is tied to a particular system size.

use nalgebra::DMatrix;

use rhc_types::{RhcError, RhcResult, UncertainPlant};

use crate::backend;

/// Safety factor by which λ exceeds the μ‖HᵀH‖ feasibility bound.
/// Fixed design constant, not exposed to callers.
const LAMBDA_MARGIN: f64 = 1.1;

/// Per-call derived constants of the augmented stage system.
#[derive(Debug, Clone)]
pub struct SaddlePointSystem {
    n: usize,
    m: usize,
    l: usize,
    /// Feasibility scalar λ > μ‖HᵀH‖₂.
    pub lambda: f64,
    cal_i: DMatrix<f64>,
    cal_g: DMatrix<f64>,
    cal_f: DMatrix<f64>,
    sigma: DMatrix<f64>,
}

impl SaddlePointSystem {
    /// Build the derived constants for one synthesis call.
    ///
    /// λ = 1.1·μ·‖HᵀH‖₂. A zero uncertainty channel makes the bound
    /// vacuous; λ = μ is used there so S22 stays invertible. The
    /// strict feasibility check runs in both cases.
    pub fn new(plant: &UncertainPlant, mu: f64) -> RhcResult<Self> {
        if !mu.is_finite() || mu <= 0.0 {
            return Err(RhcError::InfeasibleRobustnessParameter(format!(
                "mu must be a positive finite real, got {mu}"
            )));
        }

        let n = plant.n_states();
        let m = plant.n_inputs();
        let l = plant.n_uncertainty();

        let hth_norm = backend::spectral_norm(&(plant.h.transpose() * &plant.h));
        let lambda = if hth_norm > 0.0 {
            LAMBDA_MARGIN * mu * hth_norm
        } else {
            mu
        };
        if !lambda.is_finite() || lambda <= 0.0 || lambda <= mu * hth_norm {
            return Err(RhcError::InfeasibleRobustnessParameter(format!(
                "lambda = {lambda} does not exceed mu*‖HᵀH‖ = {}",
                mu * hth_norm
            )));
        }

        let eye_n = DMatrix::identity(n, n);
        let zero_ln = DMatrix::zeros(l, n);
        let cal_i = backend::vstack(&[&eye_n, &zero_ln]);
        let cal_g = backend::vstack(&[&plant.g, &plant.eg]);
        let cal_f = backend::vstack(&[&plant.f, &plant.ef]);

        let s11 = DMatrix::identity(n, n) / mu - (&plant.h * plant.h.transpose()) / lambda;
        let mut sigma = DMatrix::zeros(n + l, n + l);
        sigma.view_mut((0, 0), (n, n)).copy_from(&s11);
        for k in 0..l {
            sigma[(n + k, n + k)] = 1.0 / lambda;
        }

        Ok(Self {
            n,
            m,
            l,
            lambda,
            cal_i,
            cal_g,
            cal_f,
            sigma,
        })
    }

    /// Total row/column dimension 4n + 2m + l of the stage system.
    pub fn dim(&self) -> usize {
        4 * self.n + 2 * self.m + self.l
    }

    /// Row/column offsets of the six blocks, widths [n, m, n, n+l, n, m].
    fn offsets(&self) -> [usize; 6] {
        let (n, m, l) = (self.n, self.m, self.l);
        [
            0,
            n,
            n + m,
            2 * n + m,
            3 * n + m + l,
            4 * n + m + l,
        ]
    }

    /// Assemble M and b for one stage from the three cached inverses.
    pub fn assemble(
        &self,
        inv_p: &DMatrix<f64>,
        inv_r: &DMatrix<f64>,
        inv_q: &DMatrix<f64>,
    ) -> (DMatrix<f64>, DMatrix<f64>) {
        let (n, m, l) = (self.n, self.m, self.l);
        let [o1, o2, o3, o4, o5, o6] = self.offsets();
        let dim = self.dim();
        let eye_n = DMatrix::identity(n, n);
        let eye_m = DMatrix::identity(m, m);

        let mut mat = DMatrix::zeros(dim, dim);
        mat.view_mut((o1, o1), (n, n)).copy_from(inv_p);
        mat.view_mut((o1, o5), (n, n)).copy_from(&eye_n);
        mat.view_mut((o2, o2), (m, m)).copy_from(inv_r);
        mat.view_mut((o2, o6), (m, m)).copy_from(&eye_m);
        mat.view_mut((o3, o3), (n, n)).copy_from(inv_q);
        mat.view_mut((o4, o4), (n + l, n + l)).copy_from(&self.sigma);
        mat.view_mut((o4, o5), (n + l, n)).copy_from(&self.cal_i);
        mat.view_mut((o4, o6), (n + l, m)).copy_from(&(-&self.cal_g));
        mat.view_mut((o5, o1), (n, n)).copy_from(&eye_n);
        mat.view_mut((o5, o4), (n, n + l))
            .copy_from(&self.cal_i.transpose());
        mat.view_mut((o6, o2), (m, m)).copy_from(&eye_m);
        mat.view_mut((o6, o4), (m, n + l))
            .copy_from(&(-self.cal_g.transpose()));

        let mut rhs = DMatrix::zeros(dim, n);
        rhs.view_mut((o3, 0), (n, n)).copy_from(&(-eye_n));
        rhs.view_mut((o4, 0), (n + l, n)).copy_from(&self.cal_f);

        (mat, rhs)
    }

    /// Stage gain K: the bottom m rows of Z (the adjoint-input block).
    pub fn extract_gain(&self, z: &DMatrix<f64>) -> DMatrix<f64> {
        z.rows(4 * self.n + self.m + self.l, self.m).into_owned()
    }

    /// Propagated cost-to-go P_i = Q + cal_Fᵀ·Z₄.
    pub fn cost_update(&self, q: &DMatrix<f64>, z: &DMatrix<f64>) -> DMatrix<f64> {
        let z4 = z.rows(2 * self.n + self.m, self.n + self.l);
        q + self.cal_f.transpose() * z4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel_plant() -> UncertainPlant {
        UncertainPlant::new(
            DMatrix::from_row_slice(3, 3, &[1.1, 0.0, 0.0, 0.0, 0.0, 1.2, -1.0, 1.0, 0.0]),
            DMatrix::from_row_slice(3, 2, &[0.0, 1.0, 1.0, 1.0, -1.0, 0.0]),
            DMatrix::from_row_slice(3, 1, &[0.7, 0.5, -0.7]),
            DMatrix::from_row_slice(1, 3, &[0.4, 0.5, -0.6]),
            DMatrix::from_row_slice(1, 2, &[0.4, -0.4]),
        )
        .unwrap()
    }

    #[test]
    fn test_dim_for_reference_system() {
        // n=3, m=2, l=1 → 4·3 + 2·2 + 1 = 17
        let sys = SaddlePointSystem::new(&channel_plant(), 1e10).unwrap();
        assert_eq!(sys.dim(), 17);
    }

    #[test]
    fn test_lambda_margin() {
        let plant = channel_plant();
        let mu = 2.0;
        let sys = SaddlePointSystem::new(&plant, mu).unwrap();
        // ‖HᵀH‖ for a single column is ‖H‖², here 0.49 + 0.25 + 0.49
        let bound = mu * 1.23;
        assert!(sys.lambda > bound, "lambda = {} <= {bound}", sys.lambda);
        assert!((sys.lambda - 1.1 * bound).abs() < 1e-12);
    }

    #[test]
    fn test_zero_channel_falls_back_to_mu() {
        let plant =
            UncertainPlant::nominal(DMatrix::identity(2, 2), DMatrix::zeros(2, 1)).unwrap();
        let sys = SaddlePointSystem::new(&plant, 5.0).unwrap();
        assert!((sys.lambda - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_nonpositive_mu() {
        let plant = channel_plant();
        assert!(matches!(
            SaddlePointSystem::new(&plant, 0.0),
            Err(RhcError::InfeasibleRobustnessParameter(_))
        ));
        assert!(SaddlePointSystem::new(&plant, -3.0).is_err());
    }

    #[test]
    fn test_sigma_blocks() {
        let plant = channel_plant();
        let mu = 2.0;
        let sys = SaddlePointSystem::new(&plant, mu).unwrap();
        let lambda = sys.lambda;
        // S11[0,0] = 1/μ − H[0]²/λ
        let expected = 1.0 / mu - 0.49 / lambda;
        assert!((sys.sigma[(0, 0)] - expected).abs() < 1e-12);
        // S22 = (1/λ)I_l
        assert!((sys.sigma[(3, 3)] - 1.0 / lambda).abs() < 1e-12);
        // off-diagonal coupling between the two blocks is zero
        assert_eq!(sys.sigma[(0, 3)], 0.0);
        assert_eq!(sys.sigma[(3, 0)], 0.0);
    }

    #[test]
    fn test_assembled_shapes() {
        let plant = channel_plant();
        let sys = SaddlePointSystem::new(&plant, 1e10).unwrap();
        let inv = DMatrix::identity(3, 3);
        let inv_r = DMatrix::identity(2, 2);
        let (mat, rhs) = sys.assemble(&inv, &inv_r, &inv);
        assert_eq!(mat.shape(), (17, 17));
        assert_eq!(rhs.shape(), (17, 3));
    }

    #[test]
    fn test_rhs_layout() {
        let plant = channel_plant();
        let sys = SaddlePointSystem::new(&plant, 1e10).unwrap();
        let inv = DMatrix::identity(3, 3);
        let inv_r = DMatrix::identity(2, 2);
        let (_, rhs) = sys.assemble(&inv, &inv_r, &inv);
        // rows 0..5 zero, rows 5..8 −I₃, rows 8..12 cal_F, rows 12..17 zero
        assert_eq!(rhs[(0, 0)], 0.0);
        assert_eq!(rhs[(5, 0)], -1.0);
        assert_eq!(rhs[(6, 1)], -1.0);
        assert!((rhs[(8, 0)] - 1.1).abs() < 1e-12); // F[0,0]
        assert!((rhs[(11, 0)] - 0.4).abs() < 1e-12); // Ef[0,0]
        assert_eq!(rhs[(12, 0)], 0.0);
        assert_eq!(rhs[(16, 2)], 0.0);
    }

    #[test]
    fn test_extraction_offsets_follow_dimensions() {
        // A 2-state, 1-input, 2-channel plant: offsets must track (n,m,l),
        // not the reference system's literals.
        let plant = UncertainPlant::new(
            DMatrix::identity(2, 2),
            DMatrix::from_row_slice(2, 1, &[0.0, 1.0]),
            DMatrix::from_row_slice(2, 2, &[0.1, 0.0, 0.0, 0.1]),
            DMatrix::zeros(2, 2),
            DMatrix::zeros(2, 1),
        )
        .unwrap();
        let sys = SaddlePointSystem::new(&plant, 10.0).unwrap();
        assert_eq!(sys.dim(), 4 * 2 + 2 * 1 + 2);
        let z = DMatrix::from_fn(sys.dim(), 2, |r, _| r as f64);
        let k = sys.extract_gain(&z);
        assert_eq!(k.shape(), (1, 2));
        // bottom m rows start at 4n+m+l = 11
        assert_eq!(k[(0, 0)], 11.0);
    }
}
