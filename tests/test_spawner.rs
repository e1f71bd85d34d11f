use survival_shooter::compute::init_state;
use survival_shooter::config::GameConfig;
use survival_shooter::entities::*;
use survival_shooter::spawner::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state() -> GameState {
    init_state(GameConfig::default(), 800.0, 600.0, 0, Vec::new())
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── Roll bands ────────────────────────────────────────────────────────────────

#[test]
fn roll_bands_lower_edges() {
    assert_eq!(archetype_for_roll(0.0), Archetype::Basic);
    assert_eq!(archetype_for_roll(0.20), Archetype::Shooter);
    assert_eq!(archetype_for_roll(0.35), Archetype::Tank);
    assert_eq!(archetype_for_roll(0.50), Archetype::Speedy);
    assert_eq!(archetype_for_roll(0.60), Archetype::SuperSpeedy);
    assert_eq!(archetype_for_roll(0.70), Archetype::Explosive);
    assert_eq!(archetype_for_roll(0.77), Archetype::Regenerating);
    assert_eq!(archetype_for_roll(0.84), Archetype::Splitting);
    assert_eq!(archetype_for_roll(0.91), Archetype::Teleporting);
}

#[test]
fn roll_bands_upper_edges() {
    assert_eq!(archetype_for_roll(0.199), Archetype::Basic);
    assert_eq!(archetype_for_roll(0.349), Archetype::Shooter);
    assert_eq!(archetype_for_roll(0.909), Archetype::Splitting);
    assert_eq!(archetype_for_roll(0.9999), Archetype::Teleporting);
}

#[test]
fn regular_rolls_never_yield_boss_or_child() {
    for i in 0..1000 {
        let kind = archetype_for_roll(i as f32 / 1000.0);
        assert_ne!(kind, Archetype::Boss);
        assert_ne!(kind, Archetype::SplitChild);
    }
}

// ── Stat table ────────────────────────────────────────────────────────────────

#[test]
fn tank_template() {
    let e = make_enemy(Archetype::Tank, 7, 1.0, 2.0);
    assert_eq!(e.id, 7);
    assert_eq!((e.x, e.y), (1.0, 2.0));
    assert_eq!(e.radius, 25.0);
    assert_eq!(e.speed, 0.25);
    assert_eq!(e.damage, 40);
    assert_eq!(e.health, Some(Health { current: 5.0, max: 5.0 }));
    assert_eq!(e.behavior, Behavior::Inert);
}

#[test]
fn boss_template() {
    let e = make_enemy(Archetype::Boss, 0, 0.0, 0.0);
    assert_eq!(e.radius, 35.0);
    assert_eq!(e.speed, 0.2);
    assert_eq!(e.damage, 60);
    assert_eq!(e.health, Some(Health { current: 20.0, max: 20.0 }));
    assert_eq!(e.behavior, Behavior::Boss { shoot_rate: 240, shoot_counter: 0 });
}

#[test]
fn one_hit_archetypes_have_no_health() {
    for kind in [
        Archetype::Basic,
        Archetype::Shooter,
        Archetype::Speedy,
        Archetype::SuperSpeedy,
        Archetype::Explosive,
        Archetype::Teleporting,
    ] {
        assert!(make_enemy(kind, 0, 0.0, 0.0).health.is_none(), "{kind:?}");
    }
}

#[test]
fn special_payloads() {
    assert_eq!(
        make_enemy(Archetype::Shooter, 0, 0.0, 0.0).behavior,
        Behavior::Shooter { shoot_rate: 180, shoot_counter: 0 }
    );
    assert_eq!(
        make_enemy(Archetype::Explosive, 0, 0.0, 0.0).behavior,
        Behavior::Explosive { radius: 100.0 }
    );
    assert_eq!(
        make_enemy(Archetype::Regenerating, 0, 0.0, 0.0).behavior,
        Behavior::Regenerating { rate: 0.005 }
    );
    assert_eq!(
        make_enemy(Archetype::Teleporting, 0, 0.0, 0.0).behavior,
        Behavior::Teleporting { cooldown: 180, counter: 0 }
    );
}

#[test]
fn split_child_derives_from_parent() {
    let parent = make_enemy(Archetype::Splitting, 0, 50.0, 50.0);
    let child = make_split_child(&parent, 9, 55.0, 45.0);
    assert_eq!(child.id, 9);
    assert_eq!(child.kind, Archetype::SplitChild);
    assert_eq!(child.radius, 11.0);
    assert_eq!(child.speed, 0.75);
    assert_eq!(child.damage, 17); // floor(35 / 2)
    assert_eq!(child.color, parent.color);
    assert_eq!(child.health, Some(Health { current: 1.0, max: 1.0 }));
}

// ── Placement ─────────────────────────────────────────────────────────────────

#[test]
fn edge_positions_lie_on_an_edge() {
    let mut rng = seeded_rng();
    for _ in 0..200 {
        let (x, y) = edge_position(&mut rng, 800.0, 600.0);
        let on_edge = x == 0.0 || x == 800.0 || y == 0.0 || y == 600.0;
        assert!(on_edge, "({x}, {y})");
        assert!((0.0..=800.0).contains(&x));
        assert!((0.0..=600.0).contains(&y));
    }
}

#[test]
fn spawn_into_empty_arena_succeeds() {
    let mut s = make_state();
    assert!(try_spawn_enemy(&mut s, &mut seeded_rng()));
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.enemies[0].id, 0);
    assert_eq!(s.next_enemy_id, 1);
}

#[test]
fn overlapping_spawn_is_dropped() {
    let mut s = make_state();
    let mut wall = make_enemy(Archetype::Tank, 0, 400.0, 300.0);
    wall.radius = 10_000.0;
    s.enemies.push(wall);
    s.next_enemy_id = 1;

    assert!(!try_spawn_enemy(&mut s, &mut seeded_rng()));
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.next_enemy_id, 1);
}

// ── Spawner timers ────────────────────────────────────────────────────────────

#[test]
fn regular_spawn_on_rate() {
    let mut s = make_state();
    s.spawn_counter = 119;
    run_spawner(&mut s, &mut seeded_rng());
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.spawn_counter, 0);
}

#[test]
fn no_regular_spawn_before_rate() {
    let mut s = make_state();
    s.spawn_counter = 100;
    run_spawner(&mut s, &mut seeded_rng());
    assert!(s.enemies.is_empty());
    assert_eq!(s.spawn_counter, 101);
}

#[test]
fn boss_spawns_when_timer_reaches_interval() {
    let mut s = make_state();
    s.boss_spawn_timer_ms = 39_990.0;
    s.spawn_counter = 119;
    run_spawner(&mut s, &mut seeded_rng());

    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.enemies[0].kind, Archetype::Boss);
    assert!(s.boss_active);
    assert_eq!(s.boss_spawn_timer_ms, 0.0);
    // regular spawning is skipped once the boss is in
    assert_eq!(s.spawn_counter, 119);
}

#[test]
fn boss_timer_accumulates_nominal_tick() {
    let mut s = make_state();
    run_spawner(&mut s, &mut seeded_rng());
    assert!((s.boss_spawn_timer_ms - 1000.0 / 60.0).abs() < 1e-9);
}

#[test]
fn everything_pauses_while_boss_active() {
    let mut s = make_state();
    s.boss_active = true;
    s.spawn_counter = 119;
    s.boss_spawn_timer_ms = 39_999.0;
    run_spawner(&mut s, &mut seeded_rng());

    assert!(s.enemies.is_empty());
    assert_eq!(s.spawn_counter, 119);
    assert_eq!(s.boss_spawn_timer_ms, 39_999.0);
}
