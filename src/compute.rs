/// Pure game-logic entry points.
///
/// `step` advances a `GameSession` by exactly one fixed timestep.  The order
/// inside a tick never changes: input, spawn, motion, collision, phase.
/// Randomness only comes through the injected RNG, so a seeded RNG replays
/// a session exactly.

use glam::Vec2;
use rand::Rng;

use crate::collision;
use crate::config::GameConfig;
use crate::entities::{Entity, EntityKind, GameEvent, GameSession, GameStatus, Player};
use crate::motion;
use crate::phase::{self, PhaseTable};
use crate::spawner::Spawner;

/// Input state sampled once per tick.
///
/// `up` / `down` are level-triggered (true while held).  `fire` / `start`
/// are edge-triggered: true only on the tick the key went down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub fire: bool,
    pub start: bool,
    pub quit: bool,
}

/// What a tick produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// A quit was requested; the loop should stop now.
    pub quit: bool,
    pub events: Vec<GameEvent>,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh session sitting on the menu.  The player starts at full
/// health, vertically centred, with its centre at `player.spawn_x`.
pub fn init_session(cfg: &GameConfig) -> GameSession {
    let size = cfg.player.size;
    let pos = Vec2::new(
        cfg.player.spawn_x - size.x / 2.0,
        ((cfg.playfield.height - size.y) / 2.0).max(0.0),
    );
    GameSession {
        player: Player {
            body: Entity::new(0, EntityKind::Player, pos, size, Vec2::ZERO),
            health: cfg.player.max_health,
        },
        enemies: Vec::new(),
        projectiles: Vec::new(),
        score: 0,
        phase: 0,
        status: GameStatus::Menu,
        spawner: Spawner::default(),
        frame: 0,
        next_id: 1,
    }
}

// ── Input-driven transitions ─────────────────────────────────────────────────

/// Leave the menu.  Does nothing in any other state.
pub fn start(session: &mut GameSession) -> bool {
    if session.status != GameStatus::Menu {
        return false;
    }
    session.status = GameStatus::Playing;
    log::info!("session started");
    true
}

/// Launch a projectile centred on the player's leading (right) edge at the
/// player's vertical centre.
pub fn fire(session: &mut GameSession, cfg: &GameConfig) -> GameEvent {
    let size = cfg.projectile.size;
    let body = &session.player.body;
    let centre = Vec2::new(body.right(), body.center().y);
    let id = session.alloc_id();
    session.projectiles.push(Entity::new(
        id,
        EntityKind::Projectile,
        centre - size / 2.0,
        size,
        Vec2::new(cfg.projectile.speed, 0.0),
    ));
    GameEvent::Fired
}

// ── Per-tick step ────────────────────────────────────────────────────────────

/// Advance the session by one tick.
///
/// Quit wins in every state.  On the menu only `start` is honoured; once the
/// game is won or lost nothing moves any more.
pub fn step(
    session: &mut GameSession,
    cfg: &GameConfig,
    input: &TickInput,
    rng: &mut impl Rng,
) -> TickReport {
    let mut report = TickReport::default();
    if input.quit {
        report.quit = true;
        return report;
    }
    match session.status {
        GameStatus::Menu => {
            if input.start {
                start(session);
            }
            return report;
        }
        GameStatus::Victory | GameStatus::Defeat => return report,
        GameStatus::Playing => {}
    }

    let events = &mut report.events;
    let dt = cfg.tick_duration();
    let secs = dt.as_secs_f32();
    session.frame += 1;

    // ── 1. Input ─────────────────────────────────────────────────────────────
    if input.fire {
        events.push(fire(session, cfg));
    }

    // ── 2. Spawn ─────────────────────────────────────────────────────────────
    let id = session.next_id;
    if let Some(enemy) = session.spawner.maybe_spawn(dt, cfg, id, rng) {
        session.alloc_id();
        log::debug!("enemy {} spawned at y={:.0}", enemy.id, enemy.pos.y);
        session.enemies.push(enemy);
        events.push(GameEvent::EnemySpawned);
    }

    // ── 3. Motion ────────────────────────────────────────────────────────────
    motion::steer_player(
        &mut session.player,
        input.up,
        input.down,
        cfg.player.speed,
        secs,
        cfg.playfield.height,
    );
    for e in session.enemies.iter_mut().chain(session.projectiles.iter_mut()) {
        motion::advance(e, secs);
    }
    motion::reap_offscreen(&mut session.enemies, cfg.playfield.width);
    motion::reap_offscreen(&mut session.projectiles, cfg.playfield.width);
    motion::compact(&mut session.enemies);
    motion::compact(&mut session.projectiles);

    // ── 4. Collision ─────────────────────────────────────────────────────────
    let pairs = collision::projectiles_vs_enemies(&mut session.projectiles, &mut session.enemies);
    session.score = session
        .score
        .saturating_add(pairs.saturating_mul(cfg.score_per_kill));
    events.extend(std::iter::repeat(GameEvent::Impact).take(pairs as usize));
    motion::compact(&mut session.enemies);
    motion::compact(&mut session.projectiles);

    if collision::player_vs_enemies(&mut session.player, &mut session.enemies) {
        events.push(GameEvent::PlayerHit {
            health: session.player.health,
        });
    }
    motion::compact(&mut session.enemies);

    // ── 5. Phase & end conditions ────────────────────────────────────────────
    phase::evaluate(session, &PhaseTable::new(&cfg.phases), events);

    report
}
