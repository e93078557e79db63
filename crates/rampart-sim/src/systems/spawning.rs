//! Spawning system: releases queued hostiles onto the path start at a
//! fixed pacing interval.

use std::collections::VecDeque;

use rampart_core::arena::Arena;
use rampart_core::constants::SPAWN_INTERVAL_SECS;
use rampart_core::enums::HostileClass;
use rampart_core::units::Hostile;

/// Release at most one hostile per elapsed spawn interval. `timer`
/// accumulates across ticks so a large `dt` can release several.
pub fn run(
    queue: &mut VecDeque<HostileClass>,
    timer: &mut f64,
    dt: f64,
    hostiles: &mut Arena<Hostile>,
) {
    if queue.is_empty() {
        *timer = 0.0;
        return;
    }
    *timer += dt;
    while *timer >= SPAWN_INTERVAL_SECS {
        *timer -= SPAWN_INTERVAL_SECS;
        match queue.pop_front() {
            Some(class) => {
                hostiles.insert(Hostile::new(class));
            }
            None => break,
        }
    }
}
