// ─────────────────────────────────────────────────────────────────────
// SCPN Control — Robust RHC Gain Synthesis
// © 1998–2026 Miroslav Šotek. All rights reserved.
// License: MIT OR Apache-2.0
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Offline synthesis of robust receding-horizon state-feedback gains.
//!
//! For a discrete-time plant with a single norm-bounded uncertainty
//! channel (H, Ef, Eg), the min-max one-step problem has no closed-form
//! Riccati update; each stage is instead characterised by a linear
//! saddle-point system whose solution yields the stage gain and the
//! propagated cost-to-go simultaneously.
//!
//! Architecture:
//!   - backend: thin adapter over the dense linear-algebra library
//!   - SaddlePointSystem: per-call derived constants + stage assembly
//!   - Synthesizer: backward recursion i = N..0 with per-stage logging
//!   - lqr: nominal finite-horizon LQR baseline for cross-validation

pub mod backend;
pub mod lqr;
pub mod recursion;
pub mod saddle;

pub use lqr::riccati_schedule;
pub use recursion::{synthesize_gains, GainSchedule, StageLog, Synthesizer};
pub use saddle::SaddlePointSystem;
