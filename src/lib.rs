//! Pampas Hero - a side-scrolling terminal shooter.
//!
//! Core modules:
//! - `entities`: pure data (entities, session state, events)
//! - `spawner`, `motion`, `collision`, `phase`: the per-tick systems
//! - `compute`: one fixed-timestep tick wiring the systems together
//! - `input`, `audio`, `display`: terminal collaborators

pub mod audio;
pub mod collision;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod input;
pub mod motion;
pub mod phase;
pub mod spawner;

pub use config::GameConfig;
pub use entities::{GameEvent, GameSession, GameStatus};
