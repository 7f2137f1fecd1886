//! Motion system.
//!
//! Enemies and projectiles move in straight horizontal lines at the velocity
//! they were created with.  The player moves only vertically, driven by the
//! movement keys held this tick.

use crate::entities::{Entity, EntityKind, Player};

/// Apply an entity's constant velocity for `dt` seconds.
pub fn advance(entity: &mut Entity, dt: f32) {
    if !entity.alive {
        return;
    }
    entity.pos += entity.vel * dt;
}

/// Move the player by `speed * dt` per held key, kept inside
/// `[0, field_height - player height]`.  Holding both keys cancels out.
pub fn steer_player(player: &mut Player, up: bool, down: bool, speed: f32, dt: f32, field_height: f32) {
    let step = speed * dt;
    let mut y = player.body.pos.y;
    if up {
        y -= step;
    }
    if down {
        y += step;
    }
    let max_y = (field_height - player.body.size.y).max(0.0);
    player.body.pos.y = y.clamp(0.0, max_y);
}

/// True once the entity's box has fully left the playfield on the side it is
/// travelling towards.
pub fn is_offscreen(entity: &Entity, field_width: f32) -> bool {
    match entity.kind {
        EntityKind::Enemy { .. } => entity.right() < 0.0,
        EntityKind::Projectile => entity.left() > field_width,
        EntityKind::Player => false,
    }
}

/// Mark every entity that left the playfield as dead.  Returns how many died.
pub fn reap_offscreen(entities: &mut [Entity], field_width: f32) -> usize {
    let mut reaped = 0;
    for e in entities.iter_mut().filter(|e| e.alive) {
        if is_offscreen(e, field_width) {
            e.alive = false;
            reaped += 1;
        }
    }
    reaped
}

/// Drop dead entities.  Called between systems, never while one iterates.
pub fn compact(entities: &mut Vec<Entity>) {
    entities.retain(|e| e.alive);
}
