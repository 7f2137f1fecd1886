//! Enemy spawner: a fixed-interval timer that drops a new enemy on the
//! right edge of the playfield.

use std::time::Duration;

use glam::Vec2;
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Entity, EntityKind};

/// Returns true once `elapsed` has reached `interval`.
pub fn is_due(elapsed: Duration, interval: Duration) -> bool {
    elapsed >= interval
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Spawner {
    /// Time accumulated since the last spawn.
    pub elapsed: Duration,
}

impl Spawner {
    /// Accumulate `dt`; when the interval is reached, reset the counter and
    /// build an enemy with id `id`.
    pub fn maybe_spawn(
        &mut self,
        dt: Duration,
        cfg: &GameConfig,
        id: u32,
        rng: &mut impl Rng,
    ) -> Option<Entity> {
        self.elapsed += dt;
        if !is_due(self.elapsed, cfg.spawn_interval()) {
            return None;
        }
        self.elapsed = Duration::ZERO;
        Some(spawn_enemy(cfg, id, rng))
    }
}

/// Build an enemy just past the right edge at a uniformly random height.
pub fn spawn_enemy(cfg: &GameConfig, id: u32, rng: &mut impl Rng) -> Entity {
    let size = cfg.enemy.size;
    let max_y = (cfg.playfield.height - size.y).max(0.0);
    let y = if max_y > 0.0 {
        rng.gen_range(0.0..=max_y)
    } else {
        0.0
    };
    let variant = rng.gen_range(0..cfg.enemy.variants.max(1));
    Entity::new(
        id,
        EntityKind::Enemy { variant },
        Vec2::new(cfg.playfield.width, y),
        size,
        Vec2::new(-cfg.enemy.speed, 0.0),
    )
}
