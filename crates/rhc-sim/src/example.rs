// ─────────────────────────────────────────────────────────────────────
// SCPN Control — Canonical Example System
// © 1998–2026 Miroslav Šotek. All rights reserved.
// License: MIT OR Apache-2.0
// ─────────────────────────────────────────────────────────────────────
//! The documented 3-state, 2-input, 1-channel reference system used
//! throughout the test suite and benchmarks.

use nalgebra::{DMatrix, DVector};

use rhc_types::{QuadraticCost, SynthesisConfig, UncertainPlant};

/// Horizon length of the reference scenario.
pub const HORIZON: usize = 70;

/// Robustness scalar of the reference scenario.
pub const MU: f64 = 1e10;

/// Reference plant: unstable nominal dynamics with a rank-one channel.
pub fn example_plant() -> UncertainPlant {
    UncertainPlant::new(
        DMatrix::from_row_slice(3, 3, &[1.1, 0.0, 0.0, 0.0, 0.0, 1.2, -1.0, 1.0, 0.0]),
        DMatrix::from_row_slice(3, 2, &[0.0, 1.0, 1.0, 1.0, -1.0, 0.0]),
        DMatrix::from_row_slice(3, 1, &[0.7, 0.5, -0.7]),
        DMatrix::from_row_slice(1, 3, &[0.4, 0.5, -0.6]),
        DMatrix::from_row_slice(1, 2, &[0.4, -0.4]),
    )
    .expect("reference system is well-formed")
}

/// Identity weights Q = P_final = I₃, R = I₂.
pub fn example_cost() -> QuadraticCost {
    QuadraticCost::identity(3, 2)
}

/// Reference synthesis parameters.
pub fn example_config() -> SynthesisConfig {
    SynthesisConfig {
        horizon: HORIZON,
        mu: MU,
    }
}

/// Reference initial state.
pub fn example_x0() -> DVector<f64> {
    DVector::from_column_slice(&[1.0, -1.0, 0.5])
}
