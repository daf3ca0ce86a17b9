// ─────────────────────────────────────────────────────────────────────
// SCPN Control — Robust RHC Backward Recursion
// © 1998–2026 Miroslav Šotek. All rights reserved.
// License: MIT OR Apache-2.0
// ─────────────────────────────────────────────────────────────────────
//! Backward dynamic-programming loop over the saddle-point stage system.
//!
//! Stage i strictly requires P[i+1], so the loop runs i = N down to 0
//! and cannot be parallelised across stages. Q⁻¹ and R⁻¹ are loop
//! invariants and are computed once; a failure of either is attributed
//! to stage N, the first stage attempted.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use rhc_types::{QuadraticCost, RhcError, RhcResult, SynthesisConfig, UncertainPlant};

use crate::backend;
use crate::saddle::SaddlePointSystem;

/// Per-stage record of the backward recursion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageLog {
    pub stage: usize,
    /// max |P − Pᵀ| of the freshly propagated cost-to-go. Growth here
    /// signals an assembly bug, since the update Q + cal_Fᵀ·Z₄ is
    /// symmetric in exact arithmetic for symmetric weights.
    pub symmetry_drift: f64,
    /// Largest gain entry by magnitude, a quick saturation indicator.
    pub gain_max_abs: f64,
}

/// Finished gain schedule: N+1 gains and N+2 cost-to-go matrices.
///
/// Stage i applies `u_i = gains[i] · x_i`. `cost_to_go[N+1]` is the
/// terminal matrix exactly as supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GainSchedule {
    pub gains: Vec<DMatrix<f64>>,
    pub cost_to_go: Vec<DMatrix<f64>>,
}

impl GainSchedule {
    /// Horizon length N (= number of gains − 1).
    pub fn horizon(&self) -> usize {
        self.gains.len().saturating_sub(1)
    }

    /// Serialize for offline storage.
    pub fn to_json(&self) -> RhcResult<String> {
        serde_json::to_string(self)
            .map_err(|e| RhcError::Config(format!("JSON encode error: {e}")))
    }

    /// Restore a previously persisted schedule.
    pub fn from_json(json: &str) -> RhcResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| RhcError::Config(format!("JSON parse error: {e}")))
    }
}

/// Backward-recursion engine for one synthesis call.
///
/// Owns the P/K sequences for the duration of the call; concurrent
/// calls with independent inputs share nothing.
pub struct Synthesizer {
    plant: UncertainPlant,
    cost: QuadraticCost,
    config: SynthesisConfig,
    saddle: SaddlePointSystem,
    inv_q: DMatrix<f64>,
    inv_r: DMatrix<f64>,
    /// Per-stage log, filled by `run` in execution (backward) order.
    pub log: Vec<StageLog>,
}

impl Synthesizer {
    /// Validate the problem data eagerly and precompute the derived
    /// constants, including the loop-invariant inverses of Q and R.
    pub fn new(
        plant: UncertainPlant,
        cost: QuadraticCost,
        config: SynthesisConfig,
    ) -> RhcResult<Self> {
        config.validate()?;
        cost.check_dims(&plant)?;
        let saddle = SaddlePointSystem::new(&plant, config.mu)?;
        let inv_q = backend::invert(&cost.q, config.horizon, "Q")?;
        let inv_r = backend::invert(&cost.r, config.horizon, "R")?;
        Ok(Self {
            plant,
            cost,
            config,
            saddle,
            inv_q,
            inv_r,
            log: Vec::new(),
        })
    }

    /// Run the backward loop i = N..0 and hand back the schedule.
    pub fn run(&mut self) -> RhcResult<GainSchedule> {
        let horizon = self.config.horizon;
        self.log.clear();

        // Filled terminal-first, reversed at the end.
        let mut gains = Vec::with_capacity(horizon + 1);
        let mut cost_to_go = Vec::with_capacity(horizon + 2);
        cost_to_go.push(self.cost.p_final.clone());

        let mut p_next = self.cost.p_final.clone();
        for back in 0..=horizon {
            let stage = horizon - back;
            let inv_p = backend::invert(&p_next, stage, "P[i+1]")?;
            let (mat, rhs) = self.saddle.assemble(&inv_p, &self.inv_r, &self.inv_q);
            let z = backend::solve(mat, rhs, stage)?;

            let k_i = self.saddle.extract_gain(&z);
            let p_i = self.saddle.cost_update(&self.cost.q, &z);

            self.log.push(StageLog {
                stage,
                symmetry_drift: (&p_i - p_i.transpose()).amax(),
                gain_max_abs: k_i.amax(),
            });

            gains.push(k_i);
            cost_to_go.push(p_i.clone());
            p_next = p_i;
        }

        gains.reverse();
        cost_to_go.reverse();
        Ok(GainSchedule { gains, cost_to_go })
    }
}

/// One-shot synthesis over immutable inputs.
pub fn synthesize_gains(
    plant: &UncertainPlant,
    cost: &QuadraticCost,
    config: &SynthesisConfig,
) -> RhcResult<GainSchedule> {
    Synthesizer::new(plant.clone(), cost.clone(), config.clone())?.run()
}
