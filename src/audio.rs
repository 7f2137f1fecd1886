//! Sound cues.
//!
//! The terminal has no mixer, so the one real sink rings the terminal bell.
//! Any sink may fail; a failing sink goes quiet and the game carries on.

use std::io::Write;

use crate::entities::GameEvent;

/// One-shot sound triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Projectile launched
    Fire,
    /// Projectile destroyed an enemy
    Impact,
}

impl SoundCue {
    /// Cue for a simulation event, if it has one.
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Fired => Some(SoundCue::Fire),
            GameEvent::Impact => Some(SoundCue::Impact),
            _ => None,
        }
    }
}

pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Plays nothing.  Used with `--mute` or when sound is off in the config.
#[derive(Debug, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Rings the terminal bell on impacts.  Fire cues are too frequent to be
/// worth a bell and are skipped.
pub struct TerminalBell<W: Write> {
    out: W,
    enabled: bool,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out, enabled: true }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, cue: SoundCue) {
        if !self.enabled || cue != SoundCue::Impact {
            return;
        }
        if let Err(e) = self.out.write_all(b"\x07").and_then(|_| self.out.flush()) {
            log::warn!("terminal bell failed ({e}) - audio disabled");
            self.enabled = false;
        }
    }
}

/// Forward the cues of a tick's events to `sink`.
pub fn dispatch(sink: &mut dyn AudioSink, events: &[GameEvent]) {
    for cue in events.iter().filter_map(SoundCue::for_event) {
        sink.play(cue);
    }
}
