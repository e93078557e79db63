//! Game state snapshot: the complete visible state handed to the
//! renderer after each tick. Read-only; building one never mutates the
//! simulation beyond draining the effect-event buffer.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::enums::{DefenderKind, HostileClass, ProjectileKind};
use crate::events::EffectEvent;
use crate::types::SimTime;

/// Complete visible state for one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub time: SimTime,
    /// Number of the wave currently (or most recently) running.
    pub wave: u32,
    /// True while hostiles from the current wave are spawning or alive.
    pub wave_active: bool,
    pub base_health: i32,
    pub currency: i64,
    pub hostiles: Vec<HostileView>,
    pub defenders: Vec<DefenderView>,
    pub projectiles: Vec<ProjectileView>,
    /// Effect events accumulated since the previous snapshot.
    pub events: Vec<EffectEvent>,
}

/// A live hostile for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostileView {
    pub class: HostileClass,
    /// Interpolated world position in pixels.
    pub position: Vec2,
    pub health: i32,
    pub max_health: i32,
    /// Current speed multiplier; below 1.0 while slowed.
    pub speed_factor: f32,
    /// Total path advancement, for progress bars.
    pub total_progress: f64,
}

/// A placed defender for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefenderView {
    pub kind: DefenderKind,
    pub tile: IVec2,
    pub speed_upgrades: u32,
    pub damage_upgrades: u32,
    /// Direction the defender last fired in, for sprite rotation.
    pub aim: Vec2,
}

/// An in-flight (or lingering) projectile for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub kind: ProjectileKind,
    pub position: Vec2,
    pub direction: Vec2,
    /// True while a shell is in its post-detonation linger.
    pub exploding: bool,
}
