//! Unit data for hostiles, defenders, and projectiles.
//!
//! These are plain structs; the tick pipeline in `rampart-sim` drives
//! them. The few methods here cover per-unit bookkeeping (buff expiry,
//! the cadence gate) that multiple systems would otherwise duplicate.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::constants::{CADENCE_UPGRADE_FACTOR, SHELL_LINGER_SECS};
use crate::enums::{DefenderKind, HostileClass, ProjectileKind};
use crate::path::PathPosition;
use crate::types::tile_center;

/// A hostile unit traveling the path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hostile {
    pub class: HostileClass,
    pub health: i32,
    pub base_speed: f32,
    /// Transient speed multiplier, 1.0 when none is active.
    pub speed_mod: f32,
    /// Simulation time at which the speed modifier expires.
    pub speed_mod_until: f64,
    pub path_pos: PathPosition,
    /// Set when the unit completes the final path segment; consumed by
    /// cleanup the same tick.
    pub reached_end: bool,
}

impl Hostile {
    /// New hostile at the start of the path.
    pub fn new(class: HostileClass) -> Self {
        Self {
            class,
            health: class.health(),
            base_speed: class.speed(),
            speed_mod: 1.0,
            speed_mod_until: 0.0,
            path_pos: PathPosition::start(),
            reached_end: false,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Drop an expired speed modifier.
    pub fn expire_speed_mod(&mut self, now: f64) {
        if self.speed_mod != 1.0 && now >= self.speed_mod_until {
            self.speed_mod = 1.0;
        }
    }

    /// Apply a temporary speed multiplier until `until` (sim seconds).
    pub fn apply_speed_mod(&mut self, factor: f32, until: f64) {
        self.speed_mod = factor;
        self.speed_mod_until = until;
    }

    /// Current speed in segments per second.
    pub fn speed(&self) -> f32 {
        self.base_speed * self.speed_mod
    }
}

/// A stationary defender occupying one platform tile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defender {
    pub kind: DefenderKind,
    pub tile: IVec2,
    pub speed_upgrades: u32,
    pub damage_upgrades: u32,
    /// Temporary cadence multiplier (>1.0 fires faster), 1.0 when none.
    pub speed_buff: f32,
    pub speed_buff_until: f64,
    /// Temporary damage multiplier, 1.0 when none.
    pub damage_buff: f32,
    pub damage_buff_until: f64,
    /// Seconds since the defender last fired. Starts large so a fresh
    /// defender may fire on its first gated tick.
    pub since_last_shot: f64,
    /// Direction of the last shot, kept for the renderer.
    pub aim: Vec2,
}

impl Defender {
    pub fn new(kind: DefenderKind, tile: IVec2) -> Self {
        Self {
            kind,
            tile,
            speed_upgrades: 0,
            damage_upgrades: 0,
            speed_buff: 1.0,
            speed_buff_until: 0.0,
            damage_buff: 1.0,
            damage_buff_until: 0.0,
            since_last_shot: 100.0,
            aim: Vec2::new(0.0, 1.0),
        }
    }

    /// World-space center of the defender's tile.
    pub fn world_center(&self) -> Vec2 {
        tile_center(self.tile)
    }

    pub fn total_upgrades(&self) -> u32 {
        self.speed_upgrades + self.damage_upgrades
    }

    /// Effective seconds between activations: the base cadence shrinks
    /// geometrically with speed upgrades and is divided by an active
    /// speed buff.
    pub fn effective_cadence(&self) -> f64 {
        let base = self.kind.profile().cadence_secs;
        base * CADENCE_UPGRADE_FACTOR.powi(self.speed_upgrades as i32) / self.speed_buff as f64
    }

    /// Rate-of-fire gate. Must be called exactly once per tick per
    /// defender: it accumulates elapsed time, expires stale buffs, and
    /// reports whether enough time has passed to fire. The accumulator
    /// resets only on `mark_fired`, so an idle defender fires the
    /// moment a target appears.
    pub fn cadence_gate(&mut self, dt: f64, now: f64) -> bool {
        if self.speed_buff != 1.0 && now >= self.speed_buff_until {
            self.speed_buff = 1.0;
        }
        if self.damage_buff != 1.0 && now >= self.damage_buff_until {
            self.damage_buff = 1.0;
        }
        self.since_last_shot += dt;
        self.since_last_shot >= self.effective_cadence()
    }

    /// Record that the defender fired this tick.
    pub fn mark_fired(&mut self) {
        self.since_last_shot = 0.0;
    }

    /// Damage per hit: one point per damage upgrade plus one, scaled by
    /// an active damage buff.
    pub fn damage(&self) -> i32 {
        let base = self.damage_upgrades as f32 + 1.0;
        (base * self.damage_buff).round() as i32
    }
}

/// An in-flight projectile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub position: Vec2,
    /// Unit-length travel direction.
    pub direction: Vec2,
    /// Speed in pixels per second.
    pub speed: f32,
    /// Collision radius in pixels.
    pub hit_radius: f32,
    /// Seconds flown so far.
    pub lifetime: f32,
    /// Lifetime at which the projectile despawns unhit.
    pub max_lifetime: f32,
    pub damage: i32,
    /// Shell only: radius of the detonation.
    pub explosion_radius: f32,
    /// Shell only: true once detonated; no longer collides.
    pub exploding: bool,
    /// Shell only: seconds left in the post-detonation linger.
    pub linger: f32,
    /// Set when the projectile should be removed at cleanup.
    pub spent: bool,
}

impl Projectile {
    /// Direct-hit bolt.
    pub fn bolt(
        position: Vec2,
        direction: Vec2,
        speed: f32,
        hit_radius: f32,
        max_lifetime: f32,
        damage: i32,
    ) -> Self {
        Self {
            kind: ProjectileKind::Bolt,
            position,
            direction,
            speed,
            hit_radius,
            lifetime: 0.0,
            max_lifetime,
            damage,
            explosion_radius: 0.0,
            exploding: false,
            linger: 0.0,
            spent: false,
        }
    }

    /// Area-detonation shell.
    pub fn shell(
        position: Vec2,
        direction: Vec2,
        speed: f32,
        hit_radius: f32,
        max_lifetime: f32,
        explosion_radius: f32,
        damage: i32,
    ) -> Self {
        Self {
            kind: ProjectileKind::Shell,
            position,
            direction,
            speed,
            hit_radius,
            lifetime: 0.0,
            max_lifetime,
            damage,
            explosion_radius,
            exploding: false,
            linger: SHELL_LINGER_SECS,
            spent: false,
        }
    }
}
