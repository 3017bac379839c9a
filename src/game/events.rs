//! Game events (messages).

use bevy::prelude::*;
use std::time::Duration;

use super::{GameOverCause, Position};

/// Message triggered when a fruit is eaten (for visual effects).
#[derive(Message)]
pub struct FruitEatenEvent {
    pub position: Position,
}

/// Message triggered once when a match ends.
#[derive(Message, Clone, Debug)]
pub struct GameOverEvent {
    pub player: String,
    pub score: u32,
    pub elapsed: Duration,
    pub cause: GameOverCause,
}
