//! Score → phase controller.
//!
//! The phase is a pure function of the score: the number of ascending
//! thresholds the score has reached.  Reaching the last threshold wins the
//! game; running out of health loses it, and the loss takes priority.

use crate::config::PhaseConfig;
use crate::entities::{GameEvent, GameSession, GameStatus};

/// Clamp `index` into `0..len`, reusing the last slot past the end.
/// An empty table yields 0.
pub fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

#[derive(Clone, Debug, PartialEq)]
pub struct PhaseTable<'a> {
    thresholds: &'a [u32],
    labels: &'a [String],
}

impl<'a> PhaseTable<'a> {
    pub fn new(cfg: &'a PhaseConfig) -> Self {
        Self {
            thresholds: &cfg.thresholds,
            labels: &cfg.labels,
        }
    }

    /// Highest 1-based index `i` with `score >= thresholds[i]`, or 0 when no
    /// threshold has been reached.
    pub fn phase_for(&self, score: u32) -> usize {
        self.thresholds.partition_point(|&t| t <= score)
    }

    /// True once the score reaches the last threshold.
    pub fn is_final(&self, score: u32) -> bool {
        self.thresholds.last().is_some_and(|&last| score >= last)
    }

    /// Label for `phase`; phases past the table reuse the last label.
    pub fn label(&self, phase: usize) -> &str {
        self.labels
            .get(clamp_index(phase, self.labels.len()))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Recompute the phase from the score and decide whether the game ended.
///
/// Only acts while playing.  Pushes `PhaseChanged`, `Victory` or `Defeat`
/// onto `events` as they happen.
pub fn evaluate(session: &mut GameSession, table: &PhaseTable, events: &mut Vec<GameEvent>) {
    if session.status != GameStatus::Playing {
        return;
    }
    if session.player.health == 0 {
        session.status = GameStatus::Defeat;
        log::info!("defeat at score {}", session.score);
        events.push(GameEvent::Defeat);
        return;
    }

    let phase = table.phase_for(session.score);
    if phase != session.phase {
        session.phase = phase;
        log::info!("phase {} ({})", phase, table.label(phase));
        events.push(GameEvent::PhaseChanged { phase });
    }

    if table.is_final(session.score) {
        session.status = GameStatus::Victory;
        log::info!("victory at score {}", session.score);
        events.push(GameEvent::Victory);
    }
}
