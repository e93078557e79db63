//! Movement system: advances every live hostile along the path.
//!
//! Segment length is normalized to 1.0, so progress advances by
//! speed × modifier × dt per tick. A hostile that completes the segment
//! into the final waypoint is flagged reached-end and costs the base
//! one hit point; cleanup removes it later this tick.

use rampart_core::arena::Arena;
use rampart_core::constants::LEAK_DAMAGE;
use rampart_core::path::Path;
use rampart_core::units::Hostile;

pub fn run(
    hostiles: &mut Arena<Hostile>,
    path: &Path,
    dt: f64,
    now: f64,
    base_health: &mut i32,
) {
    let final_index = path.last_index();
    for (_slot, hostile) in hostiles.iter_mut() {
        if hostile.is_dead() || hostile.reached_end {
            continue;
        }
        hostile.expire_speed_mod(now);

        let mut progress = hostile.path_pos.progress + hostile.speed() as f64 * dt;
        if progress >= 1.0 {
            // At most one segment per tick; the remainder carries over.
            progress -= 1.0;
            if hostile.path_pos.next == final_index {
                hostile.reached_end = true;
                *base_health -= LEAK_DAMAGE;
                continue;
            }
            hostile.path_pos.last += 1;
            hostile.path_pos.next += 1;
            hostile.path_pos.passed += 1.0;
        }
        hostile.path_pos.progress = progress;
    }
}
