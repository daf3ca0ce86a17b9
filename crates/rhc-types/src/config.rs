// ─────────────────────────────────────────────────────────────────────
// SCPN Control — Robust RHC Configuration
// © 1998–2026 Miroslav Šotek. All rights reserved.
// License: MIT OR Apache-2.0
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{RhcError, RhcResult};

/// Scalar parameters of one synthesis call.
///
/// The plant and the quadratic weights travel separately as matrices;
/// this struct holds only the parameters that are meaningful to
/// persist or to receive over a config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Horizon length N. The backward recursion runs stages N down to 0,
    /// producing N+1 gains and N+2 cost-to-go matrices.
    /// Default: 50.
    pub horizon: usize,

    /// Robustness scalar mu weighting the worst-case uncertainty
    /// penalty. Must be a positive finite real.
    /// Default: 1e4.
    pub mu: f64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            horizon: 50,
            mu: 1e4,
        }
    }
}

impl SynthesisConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> RhcResult<()> {
        if !self.mu.is_finite() || self.mu <= 0.0 {
            return Err(RhcError::InfeasibleRobustnessParameter(format!(
                "mu must be a positive finite real, got {}",
                self.mu
            )));
        }
        Ok(())
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> RhcResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| RhcError::Config(format!("JSON parse error: {e}")))
    }
}
