// ─────────────────────────────────────────────────────────────────────
// SCPN Control — Robust RHC Simulation Harness
// © 1998–2026 Miroslav Šotek. All rights reserved.
// License: MIT OR Apache-2.0
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Deterministic closed-loop simulation of a robust RHC gain schedule.
//!
//! The schedule is consumed as an opaque indexed sequence of feedback
//! matrices; the per-stage uncertainty draw is an explicit input so
//! every run is reproducible. Visualisation stays out of scope.

pub mod example;
pub mod rng;
pub mod simulator;

pub use example::{example_config, example_cost, example_plant, example_x0, HORIZON, MU};
pub use rng::SimpleRng;
pub use simulator::{simulate, uniform_draws, SimulationTrace};
