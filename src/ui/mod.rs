//! UI plugin - handles the home screen, top bar, end screen, reset confirmation,
//! and the transitions between them.

use bevy::ecs::system::SystemParam;
use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::prelude::*;

use crate::config::GameConfig;
use crate::game::{
    BACKGROUND_COLOR, ERROR_COLOR, FruitRng, GamePhase, GameSet, GameState, HIGH_SCORES_SHOWN,
    InputBuffer, MenuAction, NameEntry, NameErrorText, NameInputText, ScoreText, ScreenUI,
    TOP_BAR_COLOR, TOP_BAR_HEIGHT, TEXT_COLOR, TickTimer, TimeText, format_elapsed,
};
use crate::scores::{HighScoreTable, HighScores};

const LABEL_FONT_SIZE: f32 = 26.0;
const H1_FONT_SIZE: f32 = 36.0;
const TITLE_FONT_SIZE: f32 = 48.0;
const BUTTON_HEIGHT: f32 = 50.0;

/// Plugin for UI and game flow systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera)
            .add_systems(
                Update,
                (name_entry_input, menu_buttons)
                    .chain()
                    .in_set(GameSet::Input),
            )
            .add_systems(
                Update,
                (refresh_screen, update_top_bar, update_name_box)
                    .chain()
                    .in_set(GameSet::Ui),
            );
    }
}

/// Everything a menu action may touch.
#[derive(SystemParam)]
struct GameFlow<'w> {
    game_state: ResMut<'w, GameState>,
    name_entry: ResMut<'w, NameEntry>,
    tick_timer: ResMut<'w, TickTimer>,
    input_buffer: ResMut<'w, InputBuffer>,
    rng: ResMut<'w, FruitRng>,
    high_scores: ResMut<'w, HighScores>,
    config: Res<'w, GameConfig>,
}

impl GameFlow<'_> {
    fn start_match(&mut self) {
        self.high_scores.reload();

        let speed = self.config.speed;
        self.game_state.start_match(speed, &mut self.rng.0);
        self.tick_timer.reset(speed);
        self.input_buffer.clear();

        info!("{} starts a match at speed {}", self.game_state.player_name, speed);
    }

    fn apply(&mut self, action: MenuAction) {
        match action {
            MenuAction::Start => {
                if let Some(name) = self.name_entry.submit() {
                    self.game_state.player_name = name;
                    self.start_match();
                }
            }
            MenuAction::Restart => self.start_match(),
            MenuAction::MainMenu => {
                self.name_entry.clear();
                self.game_state.return_to_menu();
            }
            MenuAction::ResetScores => self.game_state.phase = GamePhase::ConfirmReset,
            MenuAction::ConfirmReset => {
                self.high_scores.reset();
                self.name_entry.clear();
                self.game_state.return_to_menu();
            }
            MenuAction::CancelReset => self.game_state.phase = GamePhase::GameOver,
        }
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// System to type the player's name on the home screen.
fn name_entry_input(mut keyboard_reader: MessageReader<KeyboardInput>, mut flow: GameFlow) {
    if flow.game_state.phase != GamePhase::Menu {
        keyboard_reader.clear();
        return;
    }

    for event in keyboard_reader.read() {
        if event.state != ButtonState::Pressed {
            continue;
        }

        match &event.logical_key {
            Key::Enter => flow.apply(MenuAction::Start),
            Key::Backspace => flow.name_entry.backspace(),
            Key::Space => flow.name_entry.push(' '),
            Key::Character(text) => {
                for ch in text.chars() {
                    flow.name_entry.push(ch);
                }
            }
            _ => {}
        }

        if flow.game_state.phase != GamePhase::Menu {
            break;
        }
    }
}

/// System to run button actions and show hover feedback.
fn menu_buttons(
    mut interactions: Query<
        (&Interaction, &MenuAction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut flow: GameFlow,
) {
    for (interaction, action, mut background) in interactions.iter_mut() {
        match interaction {
            Interaction::Pressed => flow.apply(*action),
            Interaction::Hovered => *background = BackgroundColor(TOP_BAR_COLOR),
            Interaction::None => *background = BackgroundColor(TEXT_COLOR),
        }
    }
}

/// System to swap the full-window screen when the phase changes.
fn refresh_screen(
    mut commands: Commands,
    game_state: Res<GameState>,
    high_scores: Res<HighScores>,
    screens: Query<Entity, With<ScreenUI>>,
    mut shown: Local<Option<GamePhase>>,
) {
    if *shown == Some(game_state.phase) {
        return;
    }
    *shown = Some(game_state.phase);

    for entity in screens.iter() {
        commands.entity(entity).despawn();
    }

    match game_state.phase {
        GamePhase::Menu => spawn_home_screen(&mut commands),
        GamePhase::Playing => spawn_top_bar(&mut commands),
        GamePhase::GameOver => spawn_end_screen(&mut commands, &game_state, &high_scores.table),
        GamePhase::ConfirmReset => spawn_confirm_reset_screen(&mut commands),
    }
}

/// System to update the time and score labels.
fn update_top_bar(
    game_state: Res<GameState>,
    mut time_text: Query<&mut Text, (With<TimeText>, Without<ScoreText>)>,
    mut score_text: Query<&mut Text, (With<ScoreText>, Without<TimeText>)>,
) {
    if game_state.phase != GamePhase::Playing {
        return;
    }

    if let Ok(mut text) = time_text.single_mut() {
        *text = Text::from(format!("Time: {}", format_elapsed(game_state.elapsed)));
    }
    if let Ok(mut text) = score_text.single_mut() {
        *text = Text::from(format!("Score: {}", game_state.score()));
    }
}

/// System to mirror the typed name and the blank-name error.
fn update_name_box(
    name_entry: Res<NameEntry>,
    mut input_text: Query<&mut Text, With<NameInputText>>,
    mut error_text: Query<&mut Visibility, With<NameErrorText>>,
    added: Query<(), Added<NameInputText>>,
) {
    if !name_entry.is_changed() && added.is_empty() {
        return;
    }

    if let Ok(mut text) = input_text.single_mut() {
        *text = Text::from(name_entry.text.clone());
    }
    if let Ok(mut visibility) = error_text.single_mut() {
        *visibility = if name_entry.show_error {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

fn label(text: impl Into<String>, font_size: f32, color: Color) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(color),
    )
}

fn button(action: MenuAction, text: &str, width: f32) -> impl Bundle {
    (
        Button,
        Node {
            width: Val::Px(width),
            height: Val::Px(BUTTON_HEIGHT),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        },
        BackgroundColor(TEXT_COLOR),
        action,
        children![label(text.to_string(), LABEL_FONT_SIZE, Color::WHITE)],
    )
}

fn full_screen(background: Color) -> impl Bundle {
    (
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            align_items: AlignItems::Center,
            flex_direction: FlexDirection::Column,
            ..default()
        },
        BackgroundColor(background),
        ScreenUI,
    )
}

/// Spawns the home screen: title, start button and name box.
fn spawn_home_screen(commands: &mut Commands) {
    commands
        .spawn(full_screen(BACKGROUND_COLOR))
        .with_children(|parent| {
            parent.spawn((
                label("Snake Game", TITLE_FONT_SIZE, TEXT_COLOR),
                Node {
                    margin: UiRect::new(Val::ZERO, Val::ZERO, Val::Px(100.0), Val::Px(130.0)),
                    ..default()
                },
            ));

            parent.spawn(button(MenuAction::Start, "Start", 200.0));

            parent.spawn((
                label("Enter your name:", LABEL_FONT_SIZE, TEXT_COLOR),
                Node {
                    margin: UiRect::vertical(Val::Px(20.0)),
                    ..default()
                },
            ));

            parent
                .spawn((
                    Node {
                        width: Val::Px(200.0),
                        height: Val::Px(BUTTON_HEIGHT),
                        border: UiRect::all(Val::Px(2.0)),
                        padding: UiRect::horizontal(Val::Px(10.0)),
                        align_items: AlignItems::Center,
                        ..default()
                    },
                    BorderColor::all(TEXT_COLOR),
                ))
                .with_children(|input_box| {
                    input_box.spawn((label("", LABEL_FONT_SIZE, TEXT_COLOR), NameInputText));
                });

            parent.spawn((
                label("Please enter your name.", LABEL_FONT_SIZE, ERROR_COLOR),
                Node {
                    margin: UiRect::top(Val::Px(10.0)),
                    ..default()
                },
                Visibility::Hidden,
                NameErrorText,
            ));
        });
}

/// Spawns the top bar with the time and score labels.
fn spawn_top_bar(commands: &mut Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(0.0),
                left: Val::Px(0.0),
                width: Val::Percent(100.0),
                height: Val::Px(TOP_BAR_HEIGHT as f32),
                padding: UiRect::horizontal(Val::Px(10.0)),
                justify_content: JustifyContent::SpaceBetween,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(TOP_BAR_COLOR),
            ScreenUI,
        ))
        .with_children(|parent| {
            parent.spawn((label("Time: 00:00:0", LABEL_FONT_SIZE, Color::WHITE), TimeText));
            parent.spawn((label("Score: 0", LABEL_FONT_SIZE, Color::WHITE), ScoreText));
        });
}

/// Spawns the end screen with the match stats, the leaderboard and the buttons.
fn spawn_end_screen(commands: &mut Commands, game_state: &GameState, table: &HighScoreTable) {
    let ranked: Vec<String> = table
        .ranked(HIGH_SCORES_SHOWN)
        .into_iter()
        .enumerate()
        .map(|(idx, (name, score))| format!("{}. {}: {}", idx + 1, name, score))
        .collect();
    let time = format!("Time: {}", format_elapsed(game_state.elapsed));
    let score = format!("Score: {}", game_state.score());

    commands
        .spawn(full_screen(BACKGROUND_COLOR))
        .with_children(|parent| {
            parent.spawn((
                label("Game Over", TITLE_FONT_SIZE, TEXT_COLOR),
                Node {
                    margin: UiRect::vertical(Val::Px(25.0)),
                    ..default()
                },
            ));

            parent
                .spawn(Node {
                    width: Val::Percent(100.0),
                    flex_grow: 1.0,
                    justify_content: JustifyContent::SpaceAround,
                    ..default()
                })
                .with_children(|columns| {
                    columns
                        .spawn(Node {
                            flex_direction: FlexDirection::Column,
                            row_gap: Val::Px(15.0),
                            ..default()
                        })
                        .with_children(|stats| {
                            stats.spawn(label("Stats", H1_FONT_SIZE, TEXT_COLOR));
                            stats.spawn(label(time, LABEL_FONT_SIZE, TEXT_COLOR));
                            stats.spawn(label(score, LABEL_FONT_SIZE, TEXT_COLOR));
                        });

                    columns
                        .spawn(Node {
                            flex_direction: FlexDirection::Column,
                            row_gap: Val::Px(10.0),
                            ..default()
                        })
                        .with_children(|scores| {
                            scores.spawn(label("High Scores", H1_FONT_SIZE, TEXT_COLOR));
                            for line in ranked {
                                scores.spawn(label(line, LABEL_FONT_SIZE, TEXT_COLOR));
                            }
                        });
                });

            parent
                .spawn(Node {
                    width: Val::Percent(100.0),
                    justify_content: JustifyContent::SpaceAround,
                    margin: UiRect::bottom(Val::Px(50.0)),
                    ..default()
                })
                .with_children(|buttons| {
                    buttons.spawn(button(MenuAction::Restart, "Restart", 150.0));
                    buttons.spawn(button(MenuAction::MainMenu, "Main Menu", 200.0));
                    buttons.spawn(button(MenuAction::ResetScores, "Reset High Score", 225.0));
                });
        });
}

/// Spawns the "are you sure" screen for wiping the high scores.
fn spawn_confirm_reset_screen(commands: &mut Commands) {
    commands
        .spawn(full_screen(BACKGROUND_COLOR))
        .with_children(|parent| {
            parent.spawn((
                label("Are you sure you want to reset", H1_FONT_SIZE, TEXT_COLOR),
                Node {
                    margin: UiRect::top(Val::Px(150.0)),
                    ..default()
                },
            ));
            parent.spawn(label("your high scores?", H1_FONT_SIZE, TEXT_COLOR));

            parent
                .spawn(Node {
                    width: Val::Percent(100.0),
                    justify_content: JustifyContent::SpaceAround,
                    margin: UiRect::top(Val::Px(150.0)),
                    ..default()
                })
                .with_children(|buttons| {
                    buttons.spawn(button(MenuAction::ConfirmReset, "Yes", 200.0));
                    buttons.spawn(button(MenuAction::CancelReset, "No", 200.0));
                });
        });
}
