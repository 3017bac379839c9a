use bevy::{prelude::*, window::WindowResolution};
use bevy_vector_shapes::prelude::*;
use clap::Parser;

mod config;
mod food;
mod game;
mod rendering;
mod scores;
mod snake;
mod ui;

use config::GameConfig;
use food::FoodPlugin;
use game::{
    BACKGROUND_COLOR, FruitEatenEvent, FruitRng, GameOverEvent, GameSet, GameState, InputBuffer,
    NameEntry, TickTimer, WINDOW_HEIGHT, WINDOW_WIDTH,
};
use rendering::RenderingPlugin;
use scores::ScoresPlugin;
use snake::SnakePlugin;
use ui::UiPlugin;

fn main() {
    let config = GameConfig::parse();
    let scores_path = config.scores_path();

    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    resolution: WindowResolution::new(WINDOW_WIDTH, WINDOW_HEIGHT),
                    title: "Snake Game".to_string(),
                    resizable: false,
                    ..Default::default()
                }),
                ..default()
            }),
            Shape2dPlugin::default(),
        ))
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        .insert_resource(TickTimer::new(config.speed))
        .insert_resource(FruitRng::new(config.seed))
        .init_resource::<GameState>()
        .init_resource::<InputBuffer>()
        .init_resource::<NameEntry>()
        .add_message::<FruitEatenEvent>()
        .add_message::<GameOverEvent>()
        .configure_sets(
            Update,
            (
                GameSet::Input,
                GameSet::Tick,
                GameSet::Scores,
                GameSet::Sync,
                GameSet::Ui,
            )
                .chain(),
        )
        .insert_resource(config)
        .add_plugins((
            SnakePlugin,
            FoodPlugin,
            RenderingPlugin,
            UiPlugin,
            ScoresPlugin { path: scores_path },
        ))
        .run();
}
