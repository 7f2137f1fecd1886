/// Keyboard sampling.
///
/// Terminal key events arrive one at a time; the simulation wants one
/// `TickInput` per tick.  Movement keys are level-triggered: we remember the
/// frame each key was last pressed or repeated and treat it as held while that
/// frame is recent.  Fire, start and quit are edge-triggered and latch until
/// the next `sample`.  Holding fire does not auto-fire: it re-arms on release,
/// or once the key has been silent for longer than `HOLD_WINDOW`.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (kitty protocol): proper
///   `Press` / `Repeat` / `Release` events, so keys drop on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire after `HOLD_WINDOW` silent frames.

use std::collections::HashMap;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::compute::TickInput;

/// A key counts as held if its last press/repeat arrived within this many
/// frames.  At 60 ticks/s this is ≈133 ms, longer than any OS repeat interval.
pub const HOLD_WINDOW: u64 = 8;

#[derive(Debug, Default)]
pub struct InputSampler {
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
    fire: bool,
    start: bool,
    quit: bool,
}

fn is_up(code: &KeyCode) -> bool {
    matches!(code, KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W'))
}

fn is_down(code: &KeyCode) -> bool {
    matches!(code, KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S'))
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one terminal event.  Non-key events are ignored.
    pub fn handle(&mut self, event: &Event) {
        let Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        }) = event
        else {
            return;
        };
        match kind {
            KeyEventKind::Press => {
                // A press for a key still held is OS key-repeat on a classic
                // terminal.
                let held = self.key_frame.insert(*code, self.frame).is_some();
                match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.quit = true,
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        self.quit = true
                    }
                    KeyCode::Char(' ') if !held => self.fire = true,
                    KeyCode::Enter => self.start = true,
                    _ => {}
                }
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(*code, self.frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(code);
            }
        }
    }

    fn is_held(&self, pred: fn(&KeyCode) -> bool) -> bool {
        self.key_frame
            .iter()
            .any(|(code, &last)| pred(code) && self.frame.saturating_sub(last) <= HOLD_WINDOW)
    }

    /// Produce this tick's input, clear the edge latches and move to the
    /// next frame.
    pub fn sample(&mut self) -> TickInput {
        let input = TickInput {
            up: self.is_held(is_up),
            down: self.is_held(is_down),
            fire: std::mem::take(&mut self.fire),
            start: std::mem::take(&mut self.start),
            quit: std::mem::take(&mut self.quit),
        };
        self.frame += 1;
        let frame = self.frame;
        self.key_frame
            .retain(|_, &mut last| frame.saturating_sub(last) <= HOLD_WINDOW);
        input
    }
}
