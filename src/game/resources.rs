//! Game resources (singleton state).

use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;

use super::{Arena, Direction, MAX_NAME_LEN, Match};

/// Game phase enum to track which state the game is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Menu,
    Playing,
    GameOver,
    ConfirmReset,
}

/// Main game state resource.
#[derive(Resource, Default)]
pub struct GameState {
    pub phase: GamePhase,
    pub player_name: String,
    /// The current or just-finished match; `None` on the home screen.
    pub session: Option<Match>,
    pub elapsed: Duration,
    /// Body entities, head first, mirroring the match's snake.
    pub snake_segments: Vec<Entity>,
}

impl GameState {
    /// Begins a fresh match for the current player.
    pub fn start_match(&mut self, speed: u32, rng: &mut StdRng) {
        self.session = Some(Match::new(Arena::default(), speed, rng));
        self.elapsed = Duration::ZERO;
        self.phase = GamePhase::Playing;
    }

    /// Drops the match and returns to the home screen.
    pub fn return_to_menu(&mut self) {
        self.session = None;
        self.elapsed = Duration::ZERO;
        self.phase = GamePhase::Menu;
    }

    pub fn score(&self) -> u32 {
        self.session.as_ref().map_or(0, Match::score)
    }
}

/// The most recent steering key, applied on the next tick.
#[derive(Resource, Default)]
pub struct InputBuffer {
    pending: Option<Direction>,
}

impl InputBuffer {
    /// Records a steering request; a later request in the same tick wins.
    pub fn set_pending(&mut self, direction: Direction) {
        self.pending = Some(direction);
    }

    /// Takes the pending direction for the tick about to run.
    pub fn take(&mut self) -> Option<Direction> {
        self.pending.take()
    }

    /// Clear the pending direction.
    pub fn clear(&mut self) {
        self.pending = None;
    }
}

/// Fires once per game tick; its period follows the snake's speed.
#[derive(Resource)]
pub struct TickTimer(pub Timer);

impl TickTimer {
    pub fn new(speed: u32) -> Self {
        TickTimer(Timer::new(tick_interval(speed), TimerMode::Repeating))
    }

    /// Restarts the timer at the given speed.
    pub fn reset(&mut self, speed: u32) {
        self.0 = Timer::new(tick_interval(speed), TimerMode::Repeating);
    }

    /// Changes the period without losing progress toward the next tick.
    pub fn retune(&mut self, speed: u32) {
        self.0.set_duration(tick_interval(speed));
    }
}

/// Time between ticks at `speed` ticks per second.
pub fn tick_interval(speed: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(speed.max(1)))
}

/// Random source for fruit placement.
#[derive(Resource)]
pub struct FruitRng(pub StdRng);

impl FruitRng {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => FruitRng(StdRng::seed_from_u64(seed)),
            None => FruitRng(StdRng::from_os_rng()),
        }
    }
}

/// Text typed into the name box on the home screen.
#[derive(Resource, Default, Debug)]
pub struct NameEntry {
    pub text: String,
    pub show_error: bool,
}

impl NameEntry {
    pub fn push(&mut self, ch: char) {
        if !ch.is_control() && self.text.chars().count() < MAX_NAME_LEN {
            self.text.push(ch);
        }
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    /// The trimmed name, or `None` (and the error flag raised) if it is blank.
    pub fn submit(&mut self) -> Option<String> {
        let name = self.text.trim();
        self.show_error = name.is_empty();
        (!self.show_error).then(|| name.to_string())
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.show_error = false;
    }
}
