//! Core game module containing shared components, resources, events, constants
//! and the match rules.

use bevy::prelude::*;

mod clock;
mod components;
mod constants;
mod events;
mod resources;
mod rules;

pub use clock::*;
pub use components::*;
pub use constants::*;
pub use events::*;
pub use resources::*;
pub use rules::*;

/// Order of the work done each frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameSet {
    /// Keyboard and button handling.
    Input,
    /// Game ticks and the elapsed-time clock.
    Tick,
    /// High-score bookkeeping for finished matches.
    Scores,
    /// Entities follow the match state.
    Sync,
    /// Screens and labels.
    Ui,
}
