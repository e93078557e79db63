//! Targeting and firing system.
//!
//! For every defender, in deterministic tile order: broad-phase query
//! within the detection radius, precise Euclidean filter over the
//! candidates, furthest-progressed target selection, and, when the
//! cadence gate opens, the variant's firing behavior. Each variant has
//! exactly one arm here; adding a variant means one profile entry and
//! one arm, nowhere else.

use std::collections::BTreeMap;

use glam::Vec2;

use rampart_core::arena::{Arena, Slot};
use rampart_core::constants::*;
use rampart_core::enums::DefenderKind;
use rampart_core::events::EffectEvent;
use rampart_core::path::Path;
use rampart_core::units::{Defender, Hostile, Projectile};
use rampart_index::{GridBounds, SpatialGrid};

/// A hostile that passed the precise in-range test for one defender.
#[derive(Debug, Clone, Copy)]
pub struct RangedTarget {
    pub slot: Slot,
    pub position: Vec2,
    pub total_progress: f64,
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    defenders: &mut BTreeMap<(i32, i32), Defender>,
    hostiles: &mut Arena<Hostile>,
    projectiles: &mut Arena<Projectile>,
    grid: &mut SpatialGrid,
    path: &Path,
    currency: &mut i64,
    events: &mut Vec<EffectEvent>,
    candidates: &mut Vec<u32>,
    in_range: &mut Vec<RangedTarget>,
    dt: f64,
    now: f64,
) {
    for defender in defenders.values_mut() {
        let center = defender.world_center();
        let radius = defender.kind.profile().radius;
        collect_in_range(hostiles, path, grid, center, radius, candidates, in_range);

        // The gate must tick every frame regardless of targets, so
        // buff expiry and the elapsed accumulator stay current.
        let gate_open = defender.cadence_gate(dt, now);

        let furthest = select_furthest(in_range);
        if let Some(target) = furthest {
            let dir = (target.position - center).normalize_or_zero();
            if dir != Vec2::ZERO {
                defender.aim = dir;
            }
        }

        if !gate_open {
            continue;
        }

        match defender.kind {
            DefenderKind::Cannon => {
                if let Some(target) = furthest {
                    let dir = (target.position - center).normalize_or_zero();
                    projectiles.insert(Projectile::bolt(
                        center,
                        dir,
                        BOLT_SPEED,
                        BOLT_HIT_RADIUS,
                        CANNON_BOLT_LIFETIME,
                        defender.damage(),
                    ));
                    defender.mark_fired();
                    events.push(EffectEvent::DefenderFired {
                        kind: defender.kind,
                    });
                }
            }
            DefenderKind::Gatling => {
                if let Some(target) = furthest {
                    let dir = (target.position - center).normalize_or_zero();
                    projectiles.insert(Projectile::bolt(
                        center,
                        dir,
                        BOLT_SPEED,
                        BOLT_HIT_RADIUS,
                        GATLING_BOLT_LIFETIME,
                        defender.damage(),
                    ));
                    defender.mark_fired();
                    events.push(EffectEvent::DefenderFired {
                        kind: defender.kind,
                    });
                }
            }
            DefenderKind::Mortar => {
                if let Some(target) = furthest {
                    let dir = (target.position - center).normalize_or_zero();
                    projectiles.insert(Projectile::shell(
                        center,
                        dir,
                        SHELL_SPEED,
                        SHELL_HIT_RADIUS,
                        SHELL_LIFETIME,
                        SHELL_EXPLOSION_RADIUS,
                        defender.damage(),
                    ));
                    defender.mark_fired();
                    events.push(EffectEvent::DefenderFired {
                        kind: defender.kind,
                    });
                }
            }
            DefenderKind::Scatter => {
                // Radial volley, but only when something is in range.
                if furthest.is_some() {
                    for i in 0..SCATTER_VOLLEY {
                        let angle = i as f32 * std::f32::consts::TAU / SCATTER_VOLLEY as f32;
                        projectiles.insert(Projectile::bolt(
                            center,
                            Vec2::from_angle(angle),
                            BOLT_SPEED,
                            BOLT_HIT_RADIUS,
                            SCATTER_BOLT_LIFETIME,
                            defender.damage(),
                        ));
                    }
                    defender.mark_fired();
                    events.push(EffectEvent::DefenderFired {
                        kind: defender.kind,
                    });
                }
            }
            DefenderKind::Frost => {
                if !in_range.is_empty() {
                    let factor = FROST_BASE_SLOW
                        - FROST_SLOW_PER_UPGRADE * defender.total_upgrades() as f32;
                    let until = now + FROST_SLOW_SECS;
                    for target in in_range.iter().take(MAX_AFFECTED_HOSTILES) {
                        if let Some(hostile) = hostiles.get_mut(target.slot) {
                            hostile.apply_speed_mod(factor, until);
                        }
                    }
                    defender.mark_fired();
                    events.push(EffectEvent::DefenderFired {
                        kind: defender.kind,
                    });
                }
            }
            DefenderKind::Mint => {
                if !in_range.is_empty() {
                    let count = in_range.len().min(MAX_AFFECTED_HOSTILES) as i64;
                    let amount = MINT_BASE_YIELD * (defender.damage_upgrades as i64 + 1) * count;
                    *currency += amount;
                    events.push(EffectEvent::CurrencyMinted { amount });
                    defender.mark_fired();
                    events.push(EffectEvent::DefenderFired {
                        kind: defender.kind,
                    });
                }
            }
        }
    }
}

/// Broad-phase query followed by the precise distance test. A hostile
/// counts as in range when its center is within `radius` plus its own
/// half-extent of the query point.
pub fn collect_in_range(
    hostiles: &Arena<Hostile>,
    path: &Path,
    grid: &mut SpatialGrid,
    center: Vec2,
    radius: f32,
    candidates: &mut Vec<u32>,
    out: &mut Vec<RangedTarget>,
) {
    out.clear();
    grid.query_into(
        GridBounds {
            cx: center.x.round() as i32,
            cy: center.y.round() as i32,
            half_w: radius.ceil() as i32,
            half_h: radius.ceil() as i32,
        },
        candidates,
    );
    for &id in candidates.iter() {
        let slot = Slot::from_index(id as usize);
        let hostile = match hostiles.get(slot) {
            Some(h) if !h.is_dead() && !h.reached_end => h,
            _ => continue,
        };
        let position = path.position_between(
            hostile.path_pos.last,
            hostile.path_pos.next,
            hostile.path_pos.progress,
        );
        if position.distance(center) < radius + HOSTILE_HALF_EXTENT as f32 {
            out.push(RangedTarget {
                slot,
                position,
                total_progress: hostile.path_pos.total_progress(),
            });
        }
    }
}

/// The furthest-progressed target: passed-segment count plus progress,
/// descending, ties broken by first-found order.
pub fn select_furthest(in_range: &[RangedTarget]) -> Option<RangedTarget> {
    let mut best: Option<RangedTarget> = None;
    for target in in_range {
        match best {
            Some(b) if target.total_progress <= b.total_progress => {}
            _ => best = Some(*target),
        }
    }
    best
}
