//! Cleanup system: performs all removals queued during the tick.
//!
//! Removal is deferred to this phase so that no earlier phase ever
//! removes from an arena it (or a sibling phase) is iterating. Slain
//! hostiles credit their reward here; leaked hostiles already damaged
//! the base during movement.

use rampart_core::arena::{Arena, Slot};
use rampart_core::events::EffectEvent;
use rampart_core::units::{Hostile, Projectile};

pub fn run(
    hostiles: &mut Arena<Hostile>,
    projectiles: &mut Arena<Projectile>,
    currency: &mut i64,
    events: &mut Vec<EffectEvent>,
    removals: &mut Vec<Slot>,
) {
    removals.clear();
    for (slot, hostile) in hostiles.iter() {
        if hostile.is_dead() || hostile.reached_end {
            removals.push(slot);
        }
    }
    for &slot in removals.iter() {
        let hostile = hostiles.remove(slot);
        if hostile.is_dead() {
            let reward = hostile.class.reward();
            *currency += reward;
            events.push(EffectEvent::HostileSlain {
                class: hostile.class,
                reward,
            });
        } else {
            events.push(EffectEvent::HostileLeaked {
                class: hostile.class,
            });
        }
    }

    removals.clear();
    for (slot, projectile) in projectiles.iter() {
        if projectile.spent {
            removals.push(slot);
        }
    }
    for &slot in removals.iter() {
        projectiles.remove(slot);
    }
}
