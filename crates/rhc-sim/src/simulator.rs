// ─────────────────────────────────────────────────────────────────────
// SCPN Control — Closed-Loop Forward Simulation
// © 1998–2026 Miroslav Šotek. All rights reserved.
// License: MIT OR Apache-2.0
// ─────────────────────────────────────────────────────────────────────
//! Forward roll-out of `u_i = K[i]·x_i` under realized uncertainty:
//!
//!   x_{i+1} = (F + δ_i H Ef) x_i + (G + δ_i H Eg) u_i
//!
//! The δ sequence is an explicit input; `uniform_draws` produces a
//! reproducible one from a seed.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use rhc_synthesis::GainSchedule;
use rhc_types::{RhcError, RhcResult, UncertainPlant};

use crate::rng::SimpleRng;

/// Record of one closed-loop roll-out.
///
/// `states` has one more entry than `inputs`/`deltas` (it includes x0).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationTrace {
    pub states: Vec<DVector<f64>>,
    pub inputs: Vec<DVector<f64>>,
    pub deltas: Vec<f64>,
}

impl SimulationTrace {
    /// Number of simulated steps.
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

/// Reproducible uncertainty draws, uniform in [−1, 1).
pub fn uniform_draws(seed: u64, count: usize) -> Vec<f64> {
    let mut rng = SimpleRng::new(seed);
    (0..count).map(|_| rng.next_uniform_pm1()).collect()
}

/// Roll the closed loop forward for `deltas.len()` steps.
///
/// The schedule is treated as an opaque lookup table, so at most
/// `schedule.gains.len()` steps can be simulated.
pub fn simulate(
    plant: &UncertainPlant,
    schedule: &GainSchedule,
    x0: &DVector<f64>,
    deltas: &[f64],
) -> RhcResult<SimulationTrace> {
    let n = plant.n_states();
    let m = plant.n_inputs();
    if x0.len() != n {
        return Err(RhcError::DimensionMismatch(format!(
            "x0 has length {} but the plant has n = {n} states",
            x0.len()
        )));
    }
    if deltas.len() > schedule.gains.len() {
        return Err(RhcError::DimensionMismatch(format!(
            "{} draws exceed the {} available gains",
            deltas.len(),
            schedule.gains.len()
        )));
    }
    for (i, k) in schedule.gains.iter().take(deltas.len()).enumerate() {
        if k.shape() != (m, n) {
            return Err(RhcError::DimensionMismatch(format!(
                "gain {i} is {}x{}, expected {m}x{n}",
                k.nrows(),
                k.ncols()
            )));
        }
    }

    let mut states = Vec::with_capacity(deltas.len() + 1);
    let mut inputs = Vec::with_capacity(deltas.len());
    let mut x = x0.clone();
    states.push(x.clone());

    for (i, &delta) in deltas.iter().enumerate() {
        let u = &schedule.gains[i] * &x;
        let (fi, gi) = plant.realized(delta);
        x = fi * &x + gi * &u;
        if x.iter().any(|v| !v.is_finite()) {
            return Err(RhcError::Numerical(format!(
                "state diverged to a non-finite value at step {i}"
            )));
        }
        inputs.push(u);
        states.push(x.clone());
    }

    Ok(SimulationTrace {
        states,
        inputs,
        deltas: deltas.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::example::{example_config, example_cost, example_plant, example_x0, HORIZON};
    use rhc_synthesis::synthesize_gains;

    #[test]
    fn test_end_to_end_reference_scenario() {
        // Full reference scenario: N = 70, mu = 1e10. Synthesis must complete,
        // return 71 gains of shape (2,3), and keep the supplied terminal
        // matrix exactly.
        let plant = example_plant();
        let cost = example_cost();
        let schedule = synthesize_gains(&plant, &cost, &example_config()).unwrap();

        assert_eq!(schedule.gains.len(), HORIZON + 1);
        assert_eq!(schedule.cost_to_go.len(), HORIZON + 2);
        for k in &schedule.gains {
            assert_eq!(k.shape(), (2, 3));
        }
        assert_eq!(schedule.cost_to_go[HORIZON + 1], cost.p_final);
    }

    #[test]
    fn test_closed_loop_stays_bounded() {
        let plant = example_plant();
        let schedule =
            synthesize_gains(&plant, &example_cost(), &example_config()).unwrap();
        let deltas = uniform_draws(42, HORIZON);
        let trace = simulate(&plant, &schedule, &example_x0(), &deltas).unwrap();

        assert_eq!(trace.len(), HORIZON);
        assert_eq!(trace.states.len(), HORIZON + 1);
        assert!(trace
            .states
            .iter()
            .all(|x| x.iter().all(|v| v.is_finite())));
        // The robust gains keep the unstable plant well inside bounds.
        let worst = trace
            .states
            .iter()
            .map(|x| x.norm())
            .fold(0.0f64, f64::max);
        assert!(worst < 100.0, "worst-case state norm {worst}");
    }

    #[test]
    fn test_simulation_deterministic() {
        let plant = example_plant();
        let schedule =
            synthesize_gains(&plant, &example_cost(), &example_config()).unwrap();
        let deltas = uniform_draws(7, 20);
        let a = simulate(&plant, &schedule, &example_x0(), &deltas).unwrap();
        let b = simulate(&plant, &schedule, &example_x0(), &deltas).unwrap();
        assert_eq!(a.states, b.states);
        assert_eq!(a.inputs, b.inputs);
    }

    #[test]
    fn test_explicit_deltas_respected() {
        let plant = example_plant();
        let schedule =
            synthesize_gains(&plant, &example_cost(), &example_config()).unwrap();
        // Nominal roll-out: zero draws reduce to (F, G).
        let trace = simulate(&plant, &schedule, &example_x0(), &[0.0, 0.0]).unwrap();
        let u0 = &schedule.gains[0] * example_x0();
        let x1 = &plant.f * example_x0() + &plant.g * &u0;
        assert!((&trace.states[1] - x1).amax() < 1e-12);
    }

    #[test]
    fn test_rejects_wrong_x0_length() {
        let plant = example_plant();
        let schedule =
            synthesize_gains(&plant, &example_cost(), &example_config()).unwrap();
        let x0 = DVector::from_column_slice(&[1.0, 2.0]);
        assert!(matches!(
            simulate(&plant, &schedule, &x0, &[0.0]),
            Err(RhcError::DimensionMismatch(_))
        ));
    }

    #[test]
    fn test_rejects_more_draws_than_gains() {
        let plant = example_plant();
        let cfg = rhc_types::SynthesisConfig {
            horizon: 3,
            mu: 1e10,
        };
        let schedule = synthesize_gains(&plant, &example_cost(), &cfg).unwrap();
        let deltas = vec![0.0; 5];
        assert!(simulate(&plant, &schedule, &example_x0(), &deltas).is_err());
    }

    #[test]
    fn test_uniform_draws_reproducible() {
        assert_eq!(uniform_draws(123, 50), uniform_draws(123, 50));
        assert_ne!(uniform_draws(123, 50), uniform_draws(124, 50));
    }
}
