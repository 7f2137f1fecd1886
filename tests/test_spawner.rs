use std::time::Duration;

use pampas_hero::entities::EntityKind;
use pampas_hero::spawner::*;
use pampas_hero::GameConfig;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── is_due ────────────────────────────────────────────────────────────────────

#[test]
fn due_at_or_past_interval() {
    let interval = Duration::from_millis(500);
    assert!(!is_due(Duration::from_millis(499), interval));
    assert!(is_due(Duration::from_millis(500), interval));
    assert!(is_due(Duration::from_millis(900), interval));
}

// ── Spawner timer ─────────────────────────────────────────────────────────────

#[test]
fn no_spawn_before_interval() {
    let cfg = GameConfig::default(); // 500 ms
    let mut sp = Spawner::default();
    let mut rng = seeded_rng();
    assert!(sp.maybe_spawn(Duration::from_millis(200), &cfg, 1, &mut rng).is_none());
    assert!(sp.maybe_spawn(Duration::from_millis(200), &cfg, 1, &mut rng).is_none());
    assert_eq!(sp.elapsed, Duration::from_millis(400));
}

#[test]
fn spawn_when_interval_reached_then_reset() {
    let cfg = GameConfig::default();
    let mut sp = Spawner::default();
    let mut rng = seeded_rng();
    assert!(sp.maybe_spawn(Duration::from_millis(300), &cfg, 1, &mut rng).is_none());
    let enemy = sp.maybe_spawn(Duration::from_millis(200), &cfg, 7, &mut rng);
    assert_eq!(enemy.map(|e| e.id), Some(7));
    assert_eq!(sp.elapsed, Duration::ZERO);
    // Counter starts over
    assert!(sp.maybe_spawn(Duration::from_millis(300), &cfg, 8, &mut rng).is_none());
}

#[test]
fn one_spawn_per_interval_at_tick_rate() {
    let cfg = GameConfig::default();
    let dt = cfg.tick_duration();
    let mut sp = Spawner::default();
    let mut rng = seeded_rng();
    // 10 simulated seconds at 60 Hz, 500 ms interval → about 20 spawns
    let spawned = (0..600)
        .filter(|_| sp.maybe_spawn(dt, &cfg, 0, &mut rng).is_some())
        .count();
    assert!((19..=20).contains(&spawned), "spawned {spawned}");
}

// ── spawn_enemy ───────────────────────────────────────────────────────────────

#[test]
fn enemy_starts_at_right_edge_moving_left() {
    let cfg = GameConfig::default();
    let e = spawn_enemy(&cfg, 3, &mut seeded_rng());
    assert_eq!(e.pos.x, cfg.playfield.width);
    assert_eq!(e.size, cfg.enemy.size);
    assert_eq!(e.vel.x, -cfg.enemy.speed);
    assert_eq!(e.vel.y, 0.0);
    assert!(e.alive);
    assert!(e.is_enemy());
}

#[test]
fn enemy_height_stays_inside_field() {
    let cfg = GameConfig::default();
    let mut rng = seeded_rng();
    let max_y = cfg.playfield.height - cfg.enemy.size.y;
    for _ in 0..500 {
        let e = spawn_enemy(&cfg, 0, &mut rng);
        assert!(e.pos.y >= 0.0 && e.pos.y <= max_y, "y = {}", e.pos.y);
        match e.kind {
            EntityKind::Enemy { variant } => assert!(variant < cfg.enemy.variants),
            other => panic!("unexpected kind {other:?}"),
        }
    }
}

#[test]
fn enemy_heights_vary_between_spawns() {
    let cfg = GameConfig::default();
    let mut rng = seeded_rng();
    let ys: Vec<f32> = (0..20).map(|_| spawn_enemy(&cfg, 0, &mut rng).pos.y).collect();
    assert!(ys.windows(2).any(|w| w[0] != w[1]));
}

#[test]
fn same_seed_same_spawns() {
    let cfg = GameConfig::default();
    let a = spawn_enemy(&cfg, 0, &mut StdRng::seed_from_u64(9));
    let b = spawn_enemy(&cfg, 0, &mut StdRng::seed_from_u64(9));
    assert_eq!(a, b);
}

#[test]
fn enemy_exactly_field_height_spawns_at_top() {
    let mut cfg = GameConfig::default();
    cfg.enemy.size.y = cfg.playfield.height;
    let e = spawn_enemy(&cfg, 0, &mut seeded_rng());
    assert_eq!(e.pos.y, 0.0);
}
