//! Per-tick systems, run by the engine in a fixed order.
//!
//! Systems are free functions over the engine's state pieces; they own
//! nothing. Ordering matters: targeting and projectile collision always
//! observe this tick's post-movement positions through the freshly
//! rebuilt broad-phase grid, never a stale one.

pub mod broadphase;
pub mod cleanup;
pub mod movement;
pub mod projectiles;
pub mod snapshot;
pub mod spawning;
pub mod targeting;
