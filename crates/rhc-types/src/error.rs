// ─────────────────────────────────────────────────────────────────────
// SCPN Control — Robust RHC Error Hierarchy
// © 1998–2026 Miroslav Šotek. All rights reserved.
// License: MIT OR Apache-2.0
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all robust RHC synthesis failures.
///
/// Every error is fatal to the call that raised it: a gain schedule
/// produced from a partially failed recursion is unsafe to deploy,
/// so nothing is silently recovered and there is no retry path.
#[derive(Error, Debug)]
pub enum RhcError {
    /// An input matrix shape disagrees with the derived (n, m, l).
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// A required inversion or the stage solve hit a singular matrix.
    /// Carries the stage index at which the recursion stopped.
    #[error("singular system at stage {stage}: {detail}")]
    SingularSystem { stage: usize, detail: String },

    /// mu is non-positive, or the computed lambda fails the
    /// feasibility bound lambda > mu * ||H'H||.
    #[error("infeasible robustness parameter: {0}")]
    InfeasibleRobustnessParameter(String),

    /// Configuration or serialization error.
    #[error("config error: {0}")]
    Config(String),

    /// Numerical error (NaN/Inf in computation).
    #[error("numerical error: {0}")]
    Numerical(String),
}

pub type RhcResult<T> = Result<T, RhcError>;
