//! Simulation engine for RAMPART.
//!
//! Owns the arenas, the broad-phase grid, and the defender map; runs
//! the per-tick pipeline (spawn → move → re-index → target → projectiles
//! → cleanup) and produces `GameSnapshot`s for the frontend.

pub mod engine;
pub mod systems;
pub mod wavegen;

pub use engine::{SimConfig, SimEngine};
pub use rampart_core as core;

#[cfg(test)]
mod tests;
