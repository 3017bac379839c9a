//! Command-line and environment configuration.

use std::env;
use std::path::PathBuf;

use bevy::prelude::Resource;
use clap::Parser;

use crate::game::{INITIAL_SPEED, MAX_SPEED};

pub const HIGH_SCORES_FILE: &str = "high_scores.json";

#[derive(Parser, Resource, Debug, Clone)]
#[command(name = "snake", version, about = "Classic snake with a per-player high-score table")]
pub struct GameConfig {
    /// High-score file. Defaults to ~/high_scores.json.
    #[arg(long, env = "SNAKE_HIGH_SCORES", value_name = "PATH")]
    pub scores_file: Option<PathBuf>,

    /// Starting speed in ticks per second.
    #[arg(
        long,
        env = "SNAKE_SPEED",
        default_value_t = INITIAL_SPEED,
        value_parser = clap::value_parser!(u32).range(1..=MAX_SPEED as i64)
    )]
    pub speed: u32,

    /// Fixed seed for fruit placement.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn scores_path(&self) -> PathBuf {
        self.scores_file.clone().unwrap_or_else(default_scores_path)
    }
}

/// `high_scores.json` in the user's home directory, or the working directory
/// when no home is set.
pub fn default_scores_path() -> PathBuf {
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
        .unwrap_or_default()
        .join(HIGH_SCORES_FILE)
}
