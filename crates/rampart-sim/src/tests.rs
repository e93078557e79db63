use glam::{IVec2, Vec2};

use rampart_core::arena::{Arena, Slot};
use rampart_core::commands::{PlaceOutcome, SellOutcome, UpgradeOutcome};
use rampart_core::constants::{STARTING_BASE_HEALTH, STARTING_CURRENCY, UPGRADE_COST};
use rampart_core::enums::{DefenderKind, HostileClass};
use rampart_core::events::EffectEvent;
use rampart_core::path::{Path, PathPosition};
use rampart_core::tilemap::TileMap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::engine::{SimConfig, SimEngine};
use crate::wavegen::WaveGenerator;

const DT: f64 = 1.0 / 60.0;

/// 8x3 map: platforms top and bottom, the path running left to right
/// along the middle row. Tile (2, 2) is bare ground.
fn fixture_map() -> TileMap {
    TileMap::parse(
        "pppppppp\n\
         ........\n\
         pp.ppppp",
        8,
        3,
    )
    .unwrap()
}

fn fixture_path() -> Path {
    Path::new((0..8).map(|x| IVec2::new(x, 1)).collect()).unwrap()
}

fn fixture_engine() -> SimEngine {
    SimEngine::new(fixture_path(), fixture_map(), SimConfig::default())
}

/// A path position partway along the given segment.
fn on_segment(last: usize, progress: f64) -> PathPosition {
    PathPosition {
        last,
        next: last + 1,
        progress,
        passed: last as f64,
    }
}

#[test]
fn identical_seeds_produce_identical_runs() {
    let mut a = fixture_engine();
    let mut b = fixture_engine();
    a.place_defender(DefenderKind::Cannon, IVec2::new(1, 0));
    b.place_defender(DefenderKind::Cannon, IVec2::new(1, 0));
    a.start_wave();
    b.start_wave();
    for _ in 0..600 {
        a.advance(DT);
        b.advance(DT);
    }
    let snap_a = serde_json::to_string(&a.snapshot()).unwrap();
    let snap_b = serde_json::to_string(&b.snapshot()).unwrap();
    assert_eq!(snap_a, snap_b);
}

#[test]
fn wave_budget_compounds_by_ten_percent() {
    let mut engine = fixture_engine();
    assert_eq!(engine.wave_budget(), 100);
    engine.start_wave();
    assert_eq!(engine.wave_budget(), 110);
    engine.start_wave();
    assert_eq!(engine.wave_budget(), 121);
    engine.start_wave();
    assert_eq!(engine.wave_budget(), 133);
}

#[test]
fn generated_wave_spends_the_whole_budget() {
    let gen = WaveGenerator::new(100);
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..20 {
        let wave = gen.generate(&mut rng);
        let cost: i64 = wave.iter().map(|c| c.cost()).sum();
        assert!(cost >= 100, "wave underspent: {cost}");
        // The last draw may overshoot by at most the priciest class.
        assert!(cost < 100 + HostileClass::Juggernaut.cost());
    }
}

#[test]
fn spawning_releases_one_hostile_per_interval() {
    let mut engine = fixture_engine();
    engine.start_wave();
    for _ in 0..28 {
        engine.advance(DT);
    }
    assert_eq!(engine.hostiles().len(), 0);
    for _ in 0..4 {
        engine.advance(DT);
    }
    assert_eq!(engine.hostiles().len(), 1);
    for _ in 0..30 {
        engine.advance(DT);
    }
    assert_eq!(engine.hostiles().len(), 2);
}

#[test]
fn movement_advances_by_speed_times_dt() {
    let path = fixture_path();
    let mut hostiles = Arena::with_capacity(4);
    let mut unit = rampart_core::units::Hostile::new(HostileClass::Grunt);
    unit.base_speed = 1.0;
    let slot = hostiles.insert(unit);
    let mut base_health = STARTING_BASE_HEALTH;

    crate::systems::movement::run(&mut hostiles, &path, 0.5, 0.0, &mut base_health);
    let pos = hostiles.get(slot).unwrap().path_pos;
    assert_eq!(pos.progress, 0.5);
    assert_eq!((pos.last, pos.next), (0, 1));

    // Completing the segment advances both node indices and wraps
    // progress below 1.
    crate::systems::movement::run(&mut hostiles, &path, 0.5, 0.5, &mut base_health);
    let pos = hostiles.get(slot).unwrap().path_pos;
    assert_eq!(pos.progress, 0.0);
    assert_eq!((pos.last, pos.next), (1, 2));
    assert_eq!(pos.passed, 1.0);
}

#[test]
fn furthest_progressed_target_wins() {
    use crate::systems::targeting::{select_furthest, RangedTarget};

    let near = RangedTarget {
        slot: Slot::from_index(0),
        position: Vec2::ZERO,
        total_progress: 1.1,
    };
    let far = RangedTarget {
        slot: Slot::from_index(1),
        position: Vec2::ZERO,
        total_progress: 3.2,
    };
    let picked = select_furthest(&[near, far]).unwrap();
    assert_eq!(picked.slot, far.slot);
    let picked = select_furthest(&[far, near]).unwrap();
    assert_eq!(picked.slot, far.slot);
    assert!(select_furthest(&[]).is_none());
}

#[test]
fn single_gate_opening_fires_exactly_one_bolt() {
    let mut engine = fixture_engine();
    engine.place_defender(DefenderKind::Cannon, IVec2::new(1, 0));
    let slot = engine.spawn_hostile_at(HostileClass::Juggernaut, on_segment(1, 0.0));
    engine.advance(DT);
    assert_eq!(engine.projectiles().len(), 1);

    // Well before the one-second cadence reopens: the bolt has hit and
    // no second one exists.
    for _ in 0..20 {
        engine.advance(DT);
    }
    assert!(engine.projectiles().is_empty());
    assert_eq!(engine.hostiles().get(slot).unwrap().health, 9);
}

#[test]
fn hostile_reaching_the_end_damages_the_base() {
    let mut engine = fixture_engine();
    let slot = engine.spawn_hostile_at(HostileClass::Grunt, on_segment(6, 0.9));
    // 0.1 segments at 1.6 segments/sec is well under ten ticks.
    for _ in 0..10 {
        engine.advance(DT);
    }
    assert!(engine.hostiles().is_empty());
    assert_eq!(engine.base_health(), STARTING_BASE_HEALTH - 1);
    // Leaks pay no reward.
    assert_eq!(engine.currency(), STARTING_CURRENCY);

    // The vacated arena slot is reused by the next spawn.
    let reused = engine.spawn_hostile_at(HostileClass::Grunt, on_segment(0, 0.0));
    assert_eq!(reused, slot);
}

#[test]
fn placement_rejections_leave_state_unchanged() {
    let mut engine = fixture_engine();
    assert_eq!(
        engine.place_defender(DefenderKind::Cannon, IVec2::new(-1, 0)),
        PlaceOutcome::OffMap
    );
    assert_eq!(
        engine.place_defender(DefenderKind::Cannon, IVec2::new(3, 1)),
        PlaceOutcome::OnPath
    );
    assert_eq!(
        engine.place_defender(DefenderKind::Cannon, IVec2::new(2, 2)),
        PlaceOutcome::NotBuildable
    );
    assert_eq!(engine.currency(), STARTING_CURRENCY);

    assert_eq!(
        engine.place_defender(DefenderKind::Cannon, IVec2::new(0, 0)),
        PlaceOutcome::Placed
    );
    assert_eq!(engine.currency(), STARTING_CURRENCY - 100);
    assert_eq!(
        engine.place_defender(DefenderKind::Cannon, IVec2::new(0, 0)),
        PlaceOutcome::Occupied
    );
    // 150 left, a Gatling costs 250.
    assert_eq!(
        engine.place_defender(DefenderKind::Gatling, IVec2::new(1, 0)),
        PlaceOutcome::InsufficientFunds
    );
    assert_eq!(engine.currency(), STARTING_CURRENCY - 100);
}

#[test]
fn upgrades_respect_caps_and_funds() {
    let mut engine = fixture_engine();
    let tile = IVec2::new(0, 0);
    assert_eq!(engine.upgrade_damage(tile), UpgradeOutcome::NoDefender);

    engine.place_defender(DefenderKind::Cannon, tile);
    assert_eq!(engine.upgrade_damage(tile), UpgradeOutcome::Upgraded);
    assert_eq!(engine.currency(), STARTING_CURRENCY - 100 - UPGRADE_COST);

    engine.grant_currency(1000);
    for _ in 0..4 {
        assert_eq!(engine.upgrade_damage(tile), UpgradeOutcome::Upgraded);
    }
    // Five damage upgrades is the per-stat cap.
    assert_eq!(engine.upgrade_damage(tile), UpgradeOutcome::MaxedOut);
    assert_eq!(engine.upgrade_speed(tile), UpgradeOutcome::Upgraded);
    assert_eq!(engine.upgrade_speed(tile), UpgradeOutcome::Upgraded);
    // Seven combined upgrades is the overall cap.
    assert_eq!(engine.upgrade_speed(tile), UpgradeOutcome::MaxedOut);

    let defender = engine.defender_at(tile).unwrap();
    assert_eq!(defender.damage_upgrades, 5);
    assert_eq!(defender.speed_upgrades, 2);
}

#[test]
fn upgrade_without_funds_is_rejected() {
    let mut engine = fixture_engine();
    let tile = IVec2::new(0, 0);
    engine.place_defender(DefenderKind::Mortar, tile); // 200, leaves 50
    assert_eq!(engine.upgrade_speed(tile), UpgradeOutcome::Upgraded);
    assert_eq!(engine.upgrade_speed(tile), UpgradeOutcome::InsufficientFunds);
}

#[test]
fn selling_refunds_half_the_purchase_price() {
    let mut engine = fixture_engine();
    let tile = IVec2::new(0, 0);
    engine.place_defender(DefenderKind::Cannon, tile);
    assert_eq!(engine.sell_defender(tile), SellOutcome::Sold { refund: 50 });
    assert_eq!(engine.currency(), STARTING_CURRENCY - 50);
    assert!(engine.defender_at(tile).is_none());
    assert_eq!(engine.sell_defender(tile), SellOutcome::NoDefender);

    // The freed tile accepts a new placement.
    assert_eq!(
        engine.place_defender(DefenderKind::Frost, tile),
        PlaceOutcome::Placed
    );
}

#[test]
fn cannon_kills_a_grunt_and_credits_the_reward() {
    let mut engine = fixture_engine();
    engine.place_defender(DefenderKind::Cannon, IVec2::new(1, 0));
    engine.spawn_hostile_at(HostileClass::Grunt, on_segment(1, 0.0));
    for _ in 0..60 {
        engine.advance(DT);
    }
    assert!(engine.hostiles().is_empty());
    assert_eq!(
        engine.currency(),
        STARTING_CURRENCY - 100 + HostileClass::Grunt.reward()
    );
    assert_eq!(engine.base_health(), STARTING_BASE_HEALTH);
}

#[test]
fn mortar_shell_kills_clustered_hostiles() {
    let mut engine = fixture_engine();
    engine.place_defender(DefenderKind::Mortar, IVec2::new(1, 0));
    engine.spawn_hostile_at(HostileClass::Grunt, on_segment(1, 0.0));
    engine.spawn_hostile_at(HostileClass::Grunt, on_segment(1, 0.05));
    for _ in 0..60 {
        engine.advance(DT);
    }
    // One detonation takes both; each pays its reward.
    assert!(engine.hostiles().is_empty());
    assert_eq!(engine.currency(), STARTING_CURRENCY - 200 + 2);
}

#[test]
fn frost_slow_applies_and_expires() {
    let mut engine = fixture_engine();
    let tile = IVec2::new(1, 0);
    engine.place_defender(DefenderKind::Frost, tile);
    let slot = engine.spawn_hostile_at(HostileClass::Grunt, on_segment(1, 0.0));
    engine.advance(DT);
    let hostile = engine.hostiles().get(slot).unwrap();
    assert_eq!(hostile.speed_mod, 0.5);

    // Remove the defender so the slow is not refreshed, then run past
    // its two-second duration.
    engine.sell_defender(tile);
    for _ in 0..130 {
        engine.advance(DT);
    }
    let hostile = engine.hostiles().get(slot).unwrap();
    assert_eq!(hostile.speed_mod, 1.0);
}

#[test]
fn mint_yields_currency_per_hostile_in_range() {
    let mut engine = fixture_engine();
    engine.place_defender(DefenderKind::Mint, IVec2::new(1, 0)); // 180
    engine.spawn_hostile_at(HostileClass::Grunt, on_segment(1, 0.0));
    engine.spawn_hostile_at(HostileClass::Grunt, on_segment(1, 0.1));
    engine.spawn_hostile_at(HostileClass::Grunt, on_segment(1, 0.2));
    engine.advance(DT);
    assert_eq!(engine.currency(), STARTING_CURRENCY - 180 + 3);
}

#[test]
fn nuke_destroys_everything_and_pays_rewards() {
    let mut engine = fixture_engine();
    for i in 0..5 {
        engine.spawn_hostile_at(HostileClass::Grunt, on_segment(1, 0.1 * i as f64));
    }
    engine.nuke_all_hostiles();
    assert!(engine.hostiles().is_empty());
    assert_eq!(engine.currency(), STARTING_CURRENCY + 5);
    assert_eq!(engine.base_health(), STARTING_BASE_HEALTH);
    let snapshot = engine.snapshot();
    assert!(snapshot
        .events
        .iter()
        .any(|e| matches!(e, EffectEvent::Nuke { destroyed: 5 })));
}

#[test]
fn global_buffs_apply_to_all_defenders_and_expire() {
    let mut engine = fixture_engine();
    let tile = IVec2::new(0, 0);
    engine.place_defender(DefenderKind::Cannon, tile);

    engine.buff_defenders_damage(2.0, 5.0);
    engine.buff_defenders_speed(2.0, 5.0);
    let defender = engine.defender_at(tile).unwrap();
    assert_eq!(defender.damage(), 2);
    assert!((defender.effective_cadence() - 0.5).abs() < 1e-9);

    // Targeting runs the gate each tick even with nothing in range, so
    // buffs expire on schedule.
    for _ in 0..310 {
        engine.advance(DT);
    }
    let defender = engine.defender_at(tile).unwrap();
    assert_eq!(defender.damage(), 1);
    assert!((defender.effective_cadence() - 1.0).abs() < 1e-9);
}

#[test]
fn wave_clears_once_queue_and_field_are_empty() {
    let mut engine = fixture_engine();
    engine.start_wave();
    assert!(engine.wave_active());
    assert_eq!(engine.wave_number(), 1);
    let snapshot = engine.snapshot();
    assert!(snapshot
        .events
        .iter()
        .any(|e| matches!(e, EffectEvent::WaveStarted { wave: 1, .. })));

    // Nuke every tick so nothing survives or leaks while the queue
    // drains.
    for _ in 0..4000 {
        engine.advance(DT);
        engine.nuke_all_hostiles();
        if !engine.wave_active() {
            break;
        }
    }
    assert!(!engine.wave_active());
    assert_eq!(engine.base_health(), STARTING_BASE_HEALTH);
    let snapshot = engine.snapshot();
    assert!(snapshot
        .events
        .iter()
        .any(|e| matches!(e, EffectEvent::WaveCleared { wave: 1 })));
}

#[test]
fn snapshot_drains_events_once() {
    let mut engine = fixture_engine();
    engine.place_defender(DefenderKind::Cannon, IVec2::new(0, 0));
    let first = engine.snapshot();
    assert!(!first.events.is_empty());
    let second = engine.snapshot();
    assert!(second.events.is_empty());
}
