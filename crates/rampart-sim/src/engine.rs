//! Simulation engine: the core of the game.
//!
//! `SimEngine` owns the hostile and projectile arenas, the defender
//! map, and the broad-phase grid; runs the fixed per-tick pipeline;
//! and produces `GameSnapshot`s. Completely headless: the frame driver
//! calls `advance(dt)` once per rendered frame and decides on its own
//! when not to (pause). Deterministic: same seed and same call
//! sequence, same simulation.

use std::collections::{BTreeMap, VecDeque};

use glam::IVec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use rampart_core::arena::{Arena, Slot};
use rampart_core::commands::{PlaceOutcome, SellOutcome, UpgradeOutcome};
use rampart_core::constants::*;
use rampart_core::enums::{DefenderKind, HostileClass};
use rampart_core::events::EffectEvent;
use rampart_core::path::Path;
use rampart_core::state::GameSnapshot;
use rampart_core::tilemap::TileMap;
use rampart_core::types::SimTime;
use rampart_core::units::{Defender, Hostile, Projectile};
use rampart_index::{GridElement, SpatialGrid};

use crate::systems;
use crate::systems::targeting::RangedTarget;
use crate::wavegen::WaveGenerator;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same waves.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// Map key for the defender map. Keyed (y, x) so iteration order, and
/// therefore target contention between defenders, is deterministic.
fn tile_key(tile: IVec2) -> (i32, i32) {
    (tile.y, tile.x)
}

/// The simulation engine. Owns all match state.
pub struct SimEngine {
    path: Path,
    map: TileMap,
    hostiles: Arena<Hostile>,
    projectiles: Arena<Projectile>,
    defenders: BTreeMap<(i32, i32), Defender>,
    grid: SpatialGrid,
    rng: ChaCha8Rng,
    time: SimTime,
    base_health: i32,
    base_destroyed: bool,
    currency: i64,
    wavegen: WaveGenerator,
    wave_number: u32,
    wave_active: bool,
    spawn_queue: VecDeque<HostileClass>,
    spawn_timer: f64,
    events: Vec<EffectEvent>,

    // Reused scratch buffers, cleared by the systems that fill them.
    elements: Vec<GridElement>,
    candidates: Vec<u32>,
    in_range: Vec<RangedTarget>,
    removals: Vec<Slot>,
}

impl SimEngine {
    /// Create an engine for one match. The path and tile map come from
    /// the external map loader; a grid misconfiguration here is a
    /// content-authoring bug and aborts startup.
    pub fn new(path: Path, map: TileMap, config: SimConfig) -> Self {
        let grid = SpatialGrid::new(INDEX_TABLE_SIZE, INDEX_CELL_SIZE, INDEX_MAX_ELEMENTS)
            .expect("broad-phase grid configuration");
        Self {
            path,
            map,
            hostiles: Arena::with_capacity(ARENA_PREALLOC),
            projectiles: Arena::with_capacity(ARENA_PREALLOC),
            defenders: BTreeMap::new(),
            grid,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            time: SimTime::default(),
            base_health: STARTING_BASE_HEALTH,
            base_destroyed: false,
            currency: STARTING_CURRENCY,
            wavegen: WaveGenerator::new(STARTING_WAVE_BUDGET),
            wave_number: 0,
            wave_active: false,
            spawn_queue: VecDeque::new(),
            spawn_timer: 0.0,
            events: Vec::new(),
            elements: Vec::with_capacity(ARENA_PREALLOC),
            candidates: Vec::with_capacity(256),
            in_range: Vec::with_capacity(256),
            removals: Vec::with_capacity(256),
        }
    }

    /// Advance the simulation by one tick of `dt` seconds. The five
    /// pipeline phases always run in this order; targeting and
    /// collision see this tick's post-movement positions through the
    /// freshly rebuilt grid.
    pub fn advance(&mut self, dt: f64) {
        let now = self.time.elapsed_secs;

        systems::spawning::run(
            &mut self.spawn_queue,
            &mut self.spawn_timer,
            dt,
            &mut self.hostiles,
        );
        systems::movement::run(&mut self.hostiles, &self.path, dt, now, &mut self.base_health);
        if self.base_health <= 0 && !self.base_destroyed {
            self.base_destroyed = true;
            self.events.push(EffectEvent::BaseDestroyed);
        }
        systems::broadphase::rebuild(&self.hostiles, &self.path, &mut self.grid, &mut self.elements);
        systems::targeting::run(
            &mut self.defenders,
            &mut self.hostiles,
            &mut self.projectiles,
            &mut self.grid,
            &self.path,
            &mut self.currency,
            &mut self.events,
            &mut self.candidates,
            &mut self.in_range,
            dt,
            now,
        );
        systems::projectiles::run(
            &mut self.projectiles,
            &mut self.hostiles,
            &mut self.grid,
            &self.path,
            &mut self.events,
            &mut self.candidates,
            &mut self.in_range,
            dt,
        );
        systems::cleanup::run(
            &mut self.hostiles,
            &mut self.projectiles,
            &mut self.currency,
            &mut self.events,
            &mut self.removals,
        );

        if self.wave_active && self.spawn_queue.is_empty() && self.hostiles.is_empty() {
            self.wave_active = false;
            self.events.push(EffectEvent::WaveCleared {
                wave: self.wave_number,
            });
        }

        self.time.advance(dt);
    }

    // --- Wave control ---

    /// Generate the next wave, enqueue it for spawning, and grow the
    /// budget for the wave after. The budget grows when a wave is
    /// declared started, not when it completes.
    pub fn start_wave(&mut self) {
        let wave = self.wavegen.generate(&mut self.rng);
        self.wave_number += 1;
        self.wave_active = true;
        self.events.push(EffectEvent::WaveStarted {
            wave: self.wave_number,
            size: wave.len(),
        });
        self.spawn_queue.extend(wave);
        self.wavegen.increase_budget();
    }

    /// Spawn a single hostile at the path start, bypassing the wave
    /// queue. Used by scripted spawns and the sandbox UI.
    pub fn spawn_hostile(&mut self, class: HostileClass) {
        self.hostiles.insert(Hostile::new(class));
    }

    // --- Defender management ---

    /// Purchase price of a defender variant.
    pub fn price(&self, kind: DefenderKind) -> i64 {
        kind.profile().price
    }

    /// Attempt to place a defender. Rejections leave the simulation
    /// unchanged.
    pub fn place_defender(&mut self, kind: DefenderKind, tile: IVec2) -> PlaceOutcome {
        if !self.map.in_bounds(tile) {
            return PlaceOutcome::OffMap;
        }
        if self.path.contains_tile(tile) {
            return PlaceOutcome::OnPath;
        }
        if !self.map.is_platform(tile) {
            return PlaceOutcome::NotBuildable;
        }
        if self.defenders.contains_key(&tile_key(tile)) {
            return PlaceOutcome::Occupied;
        }
        let price = kind.profile().price;
        if self.currency < price {
            return PlaceOutcome::InsufficientFunds;
        }
        self.currency -= price;
        self.defenders.insert(tile_key(tile), Defender::new(kind, tile));
        self.events.push(EffectEvent::DefenderPlaced { kind });
        PlaceOutcome::Placed
    }

    /// Attempt a damage upgrade on the defender at `tile`.
    pub fn upgrade_damage(&mut self, tile: IVec2) -> UpgradeOutcome {
        let Some(defender) = self.defenders.get_mut(&tile_key(tile)) else {
            return UpgradeOutcome::NoDefender;
        };
        if defender.damage_upgrades >= MAX_DAMAGE_UPGRADES
            || defender.total_upgrades() >= MAX_TOTAL_UPGRADES
        {
            return UpgradeOutcome::MaxedOut;
        }
        if self.currency < UPGRADE_COST {
            return UpgradeOutcome::InsufficientFunds;
        }
        self.currency -= UPGRADE_COST;
        defender.damage_upgrades += 1;
        UpgradeOutcome::Upgraded
    }

    /// Attempt a speed upgrade on the defender at `tile`.
    pub fn upgrade_speed(&mut self, tile: IVec2) -> UpgradeOutcome {
        let Some(defender) = self.defenders.get_mut(&tile_key(tile)) else {
            return UpgradeOutcome::NoDefender;
        };
        if defender.speed_upgrades >= MAX_SPEED_UPGRADES
            || defender.total_upgrades() >= MAX_TOTAL_UPGRADES
        {
            return UpgradeOutcome::MaxedOut;
        }
        if self.currency < UPGRADE_COST {
            return UpgradeOutcome::InsufficientFunds;
        }
        self.currency -= UPGRADE_COST;
        defender.speed_upgrades += 1;
        UpgradeOutcome::Upgraded
    }

    /// Sell the defender at `tile` for half its purchase price.
    pub fn sell_defender(&mut self, tile: IVec2) -> SellOutcome {
        match self.defenders.remove(&tile_key(tile)) {
            Some(defender) => {
                let refund = defender.kind.profile().price / 2;
                self.currency += refund;
                self.events.push(EffectEvent::DefenderSold {
                    kind: defender.kind,
                    refund,
                });
                SellOutcome::Sold { refund }
            }
            None => SellOutcome::NoDefender,
        }
    }

    // --- Global effects (item system) ---

    /// Destroy every hostile on the field, crediting rewards as normal
    /// kills.
    pub fn nuke_all_hostiles(&mut self) {
        let mut destroyed = 0usize;
        for (_slot, hostile) in self.hostiles.iter_mut() {
            if !hostile.is_dead() && !hostile.reached_end {
                hostile.health = 0;
                destroyed += 1;
            }
        }
        if destroyed > 0 {
            self.events.push(EffectEvent::Nuke { destroyed });
            systems::cleanup::run(
                &mut self.hostiles,
                &mut self.projectiles,
                &mut self.currency,
                &mut self.events,
                &mut self.removals,
            );
        }
    }

    /// Temporarily multiply every defender's damage.
    pub fn buff_defenders_damage(&mut self, mult: f32, secs: f64) {
        let until = self.time.elapsed_secs + secs;
        for defender in self.defenders.values_mut() {
            defender.damage_buff = mult;
            defender.damage_buff_until = until;
        }
    }

    /// Temporarily multiply every defender's fire rate.
    pub fn buff_defenders_speed(&mut self, mult: f32, secs: f64) {
        let until = self.time.elapsed_secs + secs;
        for defender in self.defenders.values_mut() {
            defender.speed_buff = mult;
            defender.speed_buff_until = until;
        }
    }

    // --- Query surface ---

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn base_health(&self) -> i32 {
        self.base_health
    }

    pub fn currency(&self) -> i64 {
        self.currency
    }

    pub fn wave_number(&self) -> u32 {
        self.wave_number
    }

    pub fn wave_active(&self) -> bool {
        self.wave_active
    }

    /// Budget the next `start_wave` call will spend.
    pub fn wave_budget(&self) -> i64 {
        self.wavegen.budget()
    }

    /// Build the renderer-facing snapshot, draining accumulated effect
    /// events.
    pub fn snapshot(&mut self) -> GameSnapshot {
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build(
            &self.hostiles,
            &self.defenders,
            &self.projectiles,
            &self.path,
            self.time,
            self.wave_number,
            self.wave_active,
            self.base_health,
            self.currency,
            events,
        )
    }

    // --- Test access ---

    /// Read access to the hostile arena (for tests).
    #[cfg(test)]
    pub fn hostiles(&self) -> &Arena<Hostile> {
        &self.hostiles
    }

    /// Read access to the projectile arena (for tests).
    #[cfg(test)]
    pub fn projectiles(&self) -> &Arena<Projectile> {
        &self.projectiles
    }

    /// Insert a hostile at an arbitrary path position (for tests).
    #[cfg(test)]
    pub fn spawn_hostile_at(
        &mut self,
        class: HostileClass,
        path_pos: rampart_core::path::PathPosition,
    ) -> Slot {
        let mut hostile = Hostile::new(class);
        hostile.path_pos = path_pos;
        self.hostiles.insert(hostile)
    }

    /// The defender at a tile (for tests).
    #[cfg(test)]
    pub fn defender_at(&self, tile: IVec2) -> Option<&Defender> {
        self.defenders.get(&tile_key(tile))
    }

    /// Add currency directly (for tests).
    #[cfg(test)]
    pub fn grant_currency(&mut self, amount: i64) {
        self.currency += amount;
    }
}
