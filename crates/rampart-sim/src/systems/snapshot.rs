//! Snapshot system: builds the complete renderer-facing view of the
//! current state. Read-only over the arenas and defender map.

use std::collections::BTreeMap;

use rampart_core::arena::Arena;
use rampart_core::events::EffectEvent;
use rampart_core::path::Path;
use rampart_core::state::{DefenderView, GameSnapshot, HostileView, ProjectileView};
use rampart_core::types::SimTime;
use rampart_core::units::{Defender, Hostile, Projectile};

#[allow(clippy::too_many_arguments)]
pub fn build(
    hostiles: &Arena<Hostile>,
    defenders: &BTreeMap<(i32, i32), Defender>,
    projectiles: &Arena<Projectile>,
    path: &Path,
    time: SimTime,
    wave: u32,
    wave_active: bool,
    base_health: i32,
    currency: i64,
    events: Vec<EffectEvent>,
) -> GameSnapshot {
    GameSnapshot {
        time,
        wave,
        wave_active,
        base_health,
        currency,
        hostiles: hostiles
            .iter()
            .map(|(_, h)| HostileView {
                class: h.class,
                position: path.position_between(
                    h.path_pos.last,
                    h.path_pos.next,
                    h.path_pos.progress,
                ),
                health: h.health,
                max_health: h.class.health(),
                speed_factor: h.speed_mod,
                total_progress: h.path_pos.total_progress(),
            })
            .collect(),
        defenders: defenders
            .values()
            .map(|d| DefenderView {
                kind: d.kind,
                tile: d.tile,
                speed_upgrades: d.speed_upgrades,
                damage_upgrades: d.damage_upgrades,
                aim: d.aim,
            })
            .collect(),
        projectiles: projectiles
            .iter()
            .map(|(_, p)| ProjectileView {
                kind: p.kind,
                position: p.position,
                direction: p.direction,
                exploding: p.exploding,
            })
            .collect(),
        events,
    }
}
