//! Projectile update system: advance, expire, and resolve collisions.
//!
//! Bolts damage the first precisely overlapping hostile and are spent.
//! Shells detonate on first overlap, damage everything within the
//! explosion radius, then linger briefly (non-colliding) as a visual
//! before cleanup removes them. Projectiles are `Copy`: each is read
//! out, stepped, and written back, so hostile damage can be applied
//! mid-step without fighting the borrow of the projectile arena.

use rampart_core::arena::{Arena, Slot};
use rampart_core::enums::ProjectileKind;
use rampart_core::events::EffectEvent;
use rampart_core::path::Path;
use rampart_core::units::{Hostile, Projectile};
use rampart_index::SpatialGrid;

use super::targeting::{collect_in_range, RangedTarget};

#[allow(clippy::too_many_arguments)]
pub fn run(
    projectiles: &mut Arena<Projectile>,
    hostiles: &mut Arena<Hostile>,
    grid: &mut SpatialGrid,
    path: &Path,
    events: &mut Vec<EffectEvent>,
    candidates: &mut Vec<u32>,
    in_range: &mut Vec<RangedTarget>,
    dt: f64,
) {
    // Slot count snapshot: projectiles spawned by this tick's targeting
    // phase are stepped, ones spawned mid-pass would wait a tick.
    let slot_count = projectiles.slot_count();
    for idx in 0..slot_count {
        let slot = Slot::from_index(idx);
        let mut p = match projectiles.get(slot) {
            Some(p) => *p,
            None => continue,
        };
        if p.spent {
            continue;
        }

        if p.exploding {
            p.linger -= dt as f32;
            if p.linger <= 0.0 {
                p.spent = true;
            }
            projectiles.set(slot, p);
            continue;
        }

        p.position += p.direction * p.speed * dt as f32;
        p.lifetime += dt as f32;
        if p.lifetime > p.max_lifetime {
            p.spent = true;
            projectiles.set(slot, p);
            continue;
        }

        collect_in_range(hostiles, path, grid, p.position, p.hit_radius, candidates, in_range);
        if !in_range.is_empty() {
            match p.kind {
                ProjectileKind::Bolt => {
                    // First overlapping hostile takes the hit.
                    let target = in_range[0];
                    if let Some(hostile) = hostiles.get_mut(target.slot) {
                        hostile.health -= p.damage;
                    }
                    p.spent = true;
                }
                ProjectileKind::Shell => {
                    // Contact fuse: damage everything within the wider
                    // explosion radius, then linger.
                    collect_in_range(
                        hostiles,
                        path,
                        grid,
                        p.position,
                        p.explosion_radius,
                        candidates,
                        in_range,
                    );
                    for target in in_range.iter() {
                        if let Some(hostile) = hostiles.get_mut(target.slot) {
                            hostile.health -= p.damage;
                        }
                    }
                    p.exploding = true;
                    events.push(EffectEvent::Detonation {
                        position: p.position,
                        radius: p.explosion_radius,
                    });
                }
            }
        }
        projectiles.set(slot, p);
    }
}
