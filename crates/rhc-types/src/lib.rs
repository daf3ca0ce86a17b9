// ─────────────────────────────────────────────────────────────────────
// SCPN Control — Robust RHC Types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// License: MIT OR Apache-2.0
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Type definitions, configuration, and error hierarchy for robust
//! receding-horizon gain synthesis.

pub mod config;
pub mod cost;
pub mod error;
pub mod plant;

pub use config::SynthesisConfig;
pub use cost::QuadraticCost;
pub use error::{RhcError, RhcResult};
pub use plant::UncertainPlant;
