//! Game constants for window and arena size, scoring, colors and rendering layers.

use bevy::prelude::*;

use super::Position;

// Window
pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;
pub const TOP_BAR_HEIGHT: u32 = 50;

// Arena dimensions, in cells
pub const CELL_SIZE: f32 = 10.0;
pub const ARENA_WIDTH: u32 = WINDOW_WIDTH / 10;
pub const ARENA_HEIGHT: u32 = (WINDOW_HEIGHT - TOP_BAR_HEIGHT) / 10;

// Snake
pub const INITIAL_SNAKE_LENGTH: usize = 4;
/// Column 10 of the top playfield row.
pub const INITIAL_SNAKE_POSITION: Position = Position {
    x: 10,
    y: ARENA_HEIGHT as i32 - 1,
};
pub const CORNER_RADIUS: f32 = 2.0;

// Speed, in ticks per second
pub const INITIAL_SPEED: u32 = 15;
pub const MAX_SPEED: u32 = 60;
pub const SPEED_STEP: u32 = 1;

// Scoring
pub const FRUIT_POINTS: u32 = 10;
pub const BONUS_FRUIT_EVERY: u32 = 50;
pub const HIGH_SCORES_SHOWN: usize = 5;
pub const MAX_NAME_LEN: usize = 16;

// Colors
pub const BACKGROUND_COLOR: Color = Color::srgb(225.0 / 255.0, 225.0 / 255.0, 225.0 / 255.0);
pub const TOP_BAR_COLOR: Color = Color::srgb(0x13 as f32 / 255.0, 0x78 as f32 / 255.0, 0x0A as f32 / 255.0);
pub const TEXT_COLOR: Color = Color::srgb(0x1D as f32 / 255.0, 0xB3 as f32 / 255.0, 0x0E as f32 / 255.0);
pub const SNAKE_HEAD_COLOR: Color = TEXT_COLOR;
pub const SNAKE_SEGMENT_COLOR: Color = TEXT_COLOR;
pub const SNAKE_EYE_COLOR: Color = Color::BLACK;
pub const FRUIT_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);
pub const FRUIT_FLASH_COLOR: Color = Color::srgba(1.0, 0.4, 0.2, 0.8);
pub const ERROR_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);

// Z-index constants for rendering layers
pub const Z_FRUIT: f32 = 1.0;
pub const Z_SNAKE_SEGMENT: f32 = 1.5;
pub const Z_SNAKE_HEAD: f32 = 2.0;
