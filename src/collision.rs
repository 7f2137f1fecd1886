//! Collision system.
//!
//! Two independent passes run every tick after motion:
//! projectiles against enemies (scoring), then the player against enemies
//! (damage plus a field clear).  Both passes only mark entities dead; the
//! caller compacts the collections afterwards.

use crate::entities::{Entity, Player};

/// Pair each live projectile with the first live enemy it overlaps.
///
/// Both members of a pair are marked dead and leave the pass, so every
/// entity takes part in at most one hit per tick.  Returns the number of
/// destroyed pairs; the caller turns it into score.
pub fn projectiles_vs_enemies(projectiles: &mut [Entity], enemies: &mut [Entity]) -> u32 {
    let mut pairs = 0;
    for shot in projectiles.iter_mut().filter(|p| p.alive) {
        let bounds = shot.bounds();
        if let Some(enemy) = enemies
            .iter_mut()
            .find(|e| e.alive && e.bounds().overlaps(&bounds))
        {
            enemy.alive = false;
            shot.alive = false;
            pairs += 1;
            log::debug!("projectile {} destroyed enemy {}", shot.id, enemy.id);
        }
    }
    pairs
}

/// If the player overlaps any live enemy, take one point of health (never
/// below zero) and destroy every live enemy on the field.
///
/// Returns true when contact happened.
pub fn player_vs_enemies(player: &mut Player, enemies: &mut [Entity]) -> bool {
    let bounds = player.body.bounds();
    let touched = enemies
        .iter()
        .any(|e| e.alive && e.bounds().overlaps(&bounds));
    if !touched {
        return false;
    }
    player.health = player.health.saturating_sub(1);
    for enemy in enemies.iter_mut() {
        enemy.alive = false;
    }
    log::debug!("player hit, health now {}", player.health);
    true
}
