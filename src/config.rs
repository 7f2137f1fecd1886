//! Game configuration.
//!
//! Every tunable the simulation reads lives here. Values are fixed for the
//! whole process: the binary loads them once (JSON, optional) and hands an
//! immutable reference to each session.

use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayfieldConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for PlayfieldConfig {
    fn default() -> Self {
        Self {
            width: 1536.0,
            height: 1024.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub size: Vec2,
    /// Vertical speed while a movement key is held (units/s).
    pub speed: f32,
    /// Horizontal centre of the player; it never moves along x.
    pub spawn_x: f32,
    pub max_health: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            size: Vec2::new(120.0, 120.0),
            speed: 300.0,
            spawn_x: 100.0,
            max_health: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub size: Vec2,
    /// Leftward speed (units/s).
    pub speed: f32,
    /// Number of cosmetic variants to pick from on spawn.
    pub variants: u8,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            size: Vec2::new(120.0, 120.0),
            speed: 300.0,
            variants: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub size: Vec2,
    /// Rightward speed (units/s).
    pub speed: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            size: Vec2::new(70.0, 70.0),
            speed: 600.0,
        }
    }
}

/// Ordered score thresholds and the label shown for each phase.
///
/// `labels[0]` names the opening phase (no threshold met yet), `labels[i]`
/// the phase entered at `thresholds[i - 1]`. Meeting the last threshold ends
/// the game in victory, so it has no label of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseConfig {
    pub thresholds: Vec<u32>,
    pub labels: Vec<String>,
}

impl Default for PhaseConfig {
    fn default() -> Self {
        Self {
            thresholds: (1..=8).map(|i| i * 100).collect(),
            labels: [
                "Bagé",
                "Pelotas",
                "Rio Grande",
                "Aceguá",
                "Lajeado",
                "Gramado",
                "Campo Bom",
                "Piratini",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub playfield: PlayfieldConfig,
    pub tick_rate_hz: u32,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub projectile: ProjectileConfig,
    pub spawn_interval_ms: u64,
    pub score_per_kill: u32,
    pub phases: PhaseConfig,
    /// How long the victory / defeat screen stays up.
    pub terminal_display_ms: u64,
    pub sound: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            playfield: PlayfieldConfig::default(),
            tick_rate_hz: 60,
            player: PlayerConfig::default(),
            enemy: EnemyConfig::default(),
            projectile: ProjectileConfig::default(),
            spawn_interval_ms: 500,
            score_per_kill: 10,
            phases: PhaseConfig::default(),
            terminal_display_ms: 4000,
            sound: true,
        }
    }
}

impl GameConfig {
    /// Parse a JSON document. Missing fields fall back to defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(text).context("parse game config json")?;
        cfg.ensure_valid()?;
        Ok(cfg)
    }

    /// Load from `path`, or return the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            log::info!("Using default game config");
            return Ok(Self::default());
        };
        let text =
            fs::read_to_string(path).with_context(|| format!("read config {:?}", path))?;
        let cfg = Self::from_json_str(&text).with_context(|| format!("load config {:?}", path))?;
        log::info!("Loaded game config from {:?}", path);
        Ok(cfg)
    }

    /// Every problem with the configuration, empty when it is usable.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        let field = &self.playfield;
        if field.width <= 0.0 || field.height <= 0.0 {
            w.push(format!(
                "playfield dimensions must be > 0 (got {}x{})",
                field.width, field.height
            ));
        }
        if self.tick_rate_hz == 0 {
            w.push("tick_rate_hz must be > 0".into());
        }
        if self.spawn_interval_ms == 0 {
            w.push("spawn_interval_ms must be > 0".into());
        }
        if self.enemy.variants == 0 {
            w.push("enemy.variants must be > 0".into());
        }
        for (name, size) in [
            ("player", self.player.size),
            ("enemy", self.enemy.size),
            ("projectile", self.projectile.size),
        ] {
            if size.x <= 0.0 || size.y <= 0.0 {
                w.push(format!("{name}.size must be > 0 (got {}x{})", size.x, size.y));
            }
            if size.y > field.height {
                w.push(format!(
                    "{name}.size height {} exceeds playfield height {}",
                    size.y, field.height
                ));
            }
        }
        for (name, speed) in [
            ("player", self.player.speed),
            ("enemy", self.enemy.speed),
            ("projectile", self.projectile.speed),
        ] {
            if speed < 0.0 {
                w.push(format!("{name}.speed must be >= 0 (got {speed})"));
            }
        }
        if self.player.max_health == 0 {
            w.push("player.max_health must be > 0".into());
        }
        let thresholds = &self.phases.thresholds;
        if thresholds.is_empty() {
            w.push("phases.thresholds must not be empty".into());
        }
        if thresholds.windows(2).any(|p| p[0] >= p[1]) {
            w.push(format!(
                "phases.thresholds must be strictly ascending (got {:?})",
                thresholds
            ));
        }
        if self.phases.labels.is_empty() {
            w.push("phases.labels must not be empty".into());
        }
        w
    }

    fn ensure_valid(&self) -> Result<()> {
        let problems = self.validate();
        if !problems.is_empty() {
            anyhow::bail!("invalid game config: {}", problems.join("; "));
        }
        Ok(())
    }

    /// Length of one simulation tick.
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate_hz.max(1) as f64)
    }

    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }

    pub fn terminal_display(&self) -> Duration {
        Duration::from_millis(self.terminal_display_ms)
    }
}
