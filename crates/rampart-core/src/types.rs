//! Fundamental geometric and simulation types.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::constants::TILE_PIXELS;

/// Simulation time tracking. Advanced once per tick by the engine.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// World-space center of a tile, in pixels.
pub fn tile_center(tile: IVec2) -> Vec2 {
    Vec2::new(
        (tile.x * TILE_PIXELS + TILE_PIXELS / 2) as f32,
        (tile.y * TILE_PIXELS + TILE_PIXELS / 2) as f32,
    )
}
