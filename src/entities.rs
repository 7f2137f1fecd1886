/// All game entity types: pure data, plus the bounding-box geometry the
/// systems share.

use glam::Vec2;

use crate::spawner::Spawner;

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Axis-aligned bounding box in world units (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_top_left(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// True when both axis intervals share a non-empty overlap.
    /// Boxes that merely touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

// ── Entities ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    /// `variant` only selects the sprite; the rules are identical.
    Enemy { variant: u8 },
    Projectile,
}

/// Any simulated actor. `pos` is the top-left corner of the bounding box.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Constant velocity (units/s). Always zero for the player, whose motion
    /// comes from held input each tick.
    pub vel: Vec2,
    /// Cleared when the entity is destroyed; dead entities are compacted out
    /// between systems.
    pub alive: bool,
}

impl Entity {
    pub fn new(id: u32, kind: EntityKind, pos: Vec2, size: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            size,
            vel,
            alive: true,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_top_left(self.pos, self.size)
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn is_enemy(&self) -> bool {
        matches!(self.kind, EntityKind::Enemy { .. })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub body: Entity,
    /// Never increases during a session; 0 means defeat.
    pub health: u32,
}

// ── Session state ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// Waiting for the start key.
    Menu,
    Playing,
    Victory,
    Defeat,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Victory | GameStatus::Defeat)
    }
}

/// Things that happened during a tick, in the order they happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// A projectile left the player.
    Fired,
    EnemySpawned,
    /// One projectile and one enemy destroyed each other.
    Impact,
    /// The player touched an enemy; the field was cleared.
    PlayerHit { health: u32 },
    PhaseChanged { phase: usize },
    Victory,
    Defeat,
}

/// Everything one game session owns.  The loop holds it and lends it to each
/// system in turn.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub player: Player,
    pub enemies: Vec<Entity>,
    pub projectiles: Vec<Entity>,
    pub score: u32,
    /// Derived from `score` by the phase controller; never set elsewhere.
    pub phase: usize,
    pub status: GameStatus,
    pub spawner: Spawner,
    /// Ticks simulated while playing.
    pub frame: u64,
    pub next_id: u32,
}

impl GameSession {
    pub fn alloc_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Player first, then enemies, then projectiles.  Only live entities.
    pub fn live_entities(&self) -> impl Iterator<Item = &Entity> {
        std::iter::once(&self.player.body)
            .chain(self.enemies.iter())
            .chain(self.projectiles.iter())
            .filter(|e| e.alive)
    }
}
