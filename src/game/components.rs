//! ECS components for the snake game.

use bevy::prelude::*;

/// Grid cell on the playfield. `y` grows upward.
#[derive(Component, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Check if this position collides with another position.
    pub fn collides_with(&self, other: &Position) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// The neighbouring cell one step in `direction`.
    pub fn step(self, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Position::new(self.x + dx, self.y + dy)
    }

    /// True if `other` is exactly one cell away along a single axis.
    pub fn is_adjacent(&self, other: &Position) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

/// Direction enum for snake movement.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
        }
    }

    /// Maps a steering key (arrows or WASD) to its direction.
    pub fn from_key(key: KeyCode) -> Option<Direction> {
        match key {
            KeyCode::ArrowLeft | KeyCode::KeyA => Some(Direction::Left),
            KeyCode::ArrowRight | KeyCode::KeyD => Some(Direction::Right),
            KeyCode::ArrowUp | KeyCode::KeyW => Some(Direction::Up),
            KeyCode::ArrowDown | KeyCode::KeyS => Some(Direction::Down),
            _ => None,
        }
    }

    /// Rotation around z that turns a right-facing sprite toward this direction.
    pub fn angle(&self) -> f32 {
        match self {
            Direction::Right => 0.0,
            Direction::Up => std::f32::consts::FRAC_PI_2,
            Direction::Left => std::f32::consts::PI,
            Direction::Down => -std::f32::consts::FRAC_PI_2,
        }
    }
}

/// Component to mark the snake's head.
#[derive(Component)]
pub struct SnakeHead {
    pub direction: Direction,
}

/// Component to mark snake head eyes (children of head).
#[derive(Component)]
pub struct SnakeEye;

/// Component to mark snake body segments.
#[derive(Component)]
pub struct SnakeSegment;

/// Component to mark fruit entities.
#[derive(Component)]
pub struct Fruit;

/// Component for fruit pulsing animation.
#[derive(Component)]
pub struct FruitPulse {
    pub timer: Timer,
}

/// Component for entities that should flash/pulse.
#[derive(Component)]
pub struct PulseEffect {
    pub timer: Timer,
    pub start_scale: f32,
    pub end_scale: f32,
}

/// Root node of whichever full-window screen is showing.
#[derive(Component)]
pub struct ScreenUI;

/// Elapsed-time label in the top bar.
#[derive(Component)]
pub struct TimeText;

/// Component to mark the score display UI element.
#[derive(Component)]
pub struct ScoreText;

/// Text inside the name box on the home screen.
#[derive(Component)]
pub struct NameInputText;

/// "Please enter your name." label.
#[derive(Component)]
pub struct NameErrorText;

/// What a clickable button does.
#[derive(Component, Clone, Copy, PartialEq, Eq, Debug)]
pub enum MenuAction {
    Start,
    Restart,
    MainMenu,
    ResetScores,
    ConfirmReset,
    CancelReset,
}
