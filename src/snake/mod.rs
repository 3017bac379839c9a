//! Snake plugin - handles steering input, the game tick, and the body entities.

use bevy::prelude::*;
use bevy_vector_shapes::prelude::*;

use crate::game::{
    Arena, CELL_SIZE, CORNER_RADIUS, Direction, FruitEatenEvent, FruitRng, GameOverEvent, GamePhase,
    GameSet, GameState, InputBuffer, Position, SNAKE_EYE_COLOR, SNAKE_HEAD_COLOR,
    SNAKE_SEGMENT_COLOR, SnakeEye, SnakeHead, SnakeSegment, TickOutcome, TickTimer, Z_SNAKE_HEAD,
    Z_SNAKE_SEGMENT,
};
use crate::rendering::cell_center;

/// Plugin for snake-related systems.
pub struct SnakePlugin;

impl Plugin for SnakePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, snake_movement_input.in_set(GameSet::Input))
            .add_systems(
                Update,
                (advance_match_clock, snake_tick)
                    .chain()
                    .in_set(GameSet::Tick),
            )
            .add_systems(Update, sync_snake_entities.in_set(GameSet::Sync));
    }
}

/// Spawns the snake head entity with eyes.
pub fn spawn_snake_head(commands: &mut Commands, position: Position, direction: Direction) -> Entity {
    let size = CELL_SIZE;
    // Normalize corner radius relative to the shape size (0.0 to 1.0 range)
    let corner_radius_normalized = CORNER_RADIUS / (size / 2.0);

    commands
        .spawn((
            ShapeBundle::rect(
                &ShapeConfig {
                    color: SNAKE_HEAD_COLOR,
                    corner_radii: Vec4::splat(corner_radius_normalized),
                    transform: Transform::from_translation(cell_center(position).extend(Z_SNAKE_HEAD))
                        .with_rotation(Quat::from_rotation_z(direction.angle())),
                    ..ShapeConfig::default_2d()
                },
                Vec2::splat(size),
            ),
            SnakeHead { direction },
            position,
        ))
        .with_children(|parent| {
            let eye_radius = CELL_SIZE * 0.2;

            // Eyes sit toward the front of a right-facing head.
            for side in [1.0, -1.0] {
                parent.spawn((
                    ShapeBundle::circle(
                        &ShapeConfig {
                            color: SNAKE_EYE_COLOR,
                            transform: Transform::from_xyz(
                                CELL_SIZE * 0.2,
                                side * CELL_SIZE * 0.2,
                                0.1,
                            ),
                            ..ShapeConfig::default_2d()
                        },
                        eye_radius,
                    ),
                    SnakeEye,
                ));
            }
        })
        .id()
}

/// Spawns a snake body segment at the given position.
pub fn spawn_snake_segment(commands: &mut Commands, position: Position) -> Entity {
    let size = CELL_SIZE;
    let corner_radius_normalized = CORNER_RADIUS / (size / 2.0);

    commands
        .spawn((
            ShapeBundle::rect(
                &ShapeConfig {
                    color: SNAKE_SEGMENT_COLOR,
                    corner_radii: Vec4::splat(corner_radius_normalized),
                    transform: Transform::from_translation(
                        cell_center(position).extend(Z_SNAKE_SEGMENT),
                    ),
                    ..ShapeConfig::default_2d()
                },
                Vec2::splat(size),
            ),
            SnakeSegment,
            position,
        ))
        .id()
}

/// System to read keyboard input into the pending direction.
fn snake_movement_input(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut input_buffer: ResMut<InputBuffer>,
    game_state: Res<GameState>,
) {
    if game_state.phase != GamePhase::Playing {
        return;
    }

    for key in keyboard_input.get_just_pressed() {
        if let Some(direction) = Direction::from_key(*key) {
            input_buffer.set_pending(direction);
        }
    }
}

/// System to accumulate match time while playing.
fn advance_match_clock(time: Res<Time>, mut game_state: ResMut<GameState>) {
    if game_state.phase == GamePhase::Playing {
        game_state.elapsed += time.delta();
    }
}

/// System to run one match step for every tick interval that elapsed this frame.
fn snake_tick(
    time: Res<Time>,
    mut game_state: ResMut<GameState>,
    mut tick_timer: ResMut<TickTimer>,
    mut input_buffer: ResMut<InputBuffer>,
    mut rng: ResMut<FruitRng>,
    mut fruit_eaten_writer: MessageWriter<FruitEatenEvent>,
    mut game_over_writer: MessageWriter<GameOverEvent>,
) {
    if game_state.phase != GamePhase::Playing {
        return;
    }

    tick_timer.0.tick(time.delta());
    let steps = tick_timer.0.times_finished_this_tick();

    let state = &mut *game_state;
    let Some(session) = state.session.as_mut() else {
        return;
    };

    for _ in 0..steps {
        match session.tick(input_buffer.take(), &mut rng.0) {
            TickOutcome::Moved => {}
            TickOutcome::Ate { fruit, bonus } => {
                tick_timer.retune(session.speed());
                fruit_eaten_writer.write(FruitEatenEvent { position: fruit });
                if bonus {
                    debug!("bonus fruit at {} points", session.score());
                }
            }
            TickOutcome::Over(cause) => {
                state.phase = GamePhase::GameOver;
                game_over_writer.write(GameOverEvent {
                    player: state.player_name.clone(),
                    score: session.score(),
                    elapsed: state.elapsed,
                    cause,
                });
                break;
            }
        }
    }
}

/// System to keep one entity per body cell, head first.
fn sync_snake_entities(
    mut commands: Commands,
    mut game_state: ResMut<GameState>,
    mut parts: Query<(&mut Position, Option<&mut SnakeHead>)>,
) {
    let state = &mut *game_state;
    let (body, direction, arena): (Vec<Position>, Direction, Arena) = match &state.session {
        Some(session) => (
            session.snake().body().iter().copied().collect(),
            session.snake().direction(),
            session.arena(),
        ),
        None => (Vec::new(), Direction::Right, Arena::default()),
    };

    while state.snake_segments.len() > body.len() {
        if let Some(entity) = state.snake_segments.pop() {
            commands.entity(entity).despawn();
        }
    }

    for (index, cell) in body.iter().enumerate() {
        let Some(&entity) = state.snake_segments.get(index) else {
            let entity = if index == 0 {
                spawn_snake_head(&mut commands, *cell, direction)
            } else {
                spawn_snake_segment(&mut commands, *cell)
            };
            state.snake_segments.push(entity);
            continue;
        };

        // A head that ran into the wall stays on its last cell.
        if !arena.contains(*cell) {
            continue;
        }

        if let Ok((mut position, head)) = parts.get_mut(entity) {
            if *position != *cell {
                *position = *cell;
            }
            if let Some(mut head) = head
                && head.direction != direction
            {
                head.direction = direction;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameOverCause, Match, Snake};
    use crate::scores::{HighScores, ScoresPlugin};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::Duration;
    use tempfile::TempDir;

    fn quiet_match(arena: Arena, snake: Snake, speed: u32) -> Match {
        let mut session = Match::with_snake(arena, snake, speed, &mut StdRng::seed_from_u64(1));
        session.set_fruits(Vec::new());
        session
    }

    fn playing(session: Match) -> GameState {
        GameState {
            phase: GamePhase::Playing,
            player_name: "ada".to_string(),
            session: Some(session),
            ..default()
        }
    }

    fn tick_app(dir: &TempDir, session: Match, speed: u32) -> App {
        let mut app = App::new();
        app.init_resource::<Time>()
            .insert_resource(TickTimer::new(speed))
            .insert_resource(FruitRng::new(Some(3)))
            .init_resource::<InputBuffer>()
            .insert_resource(playing(session))
            .add_message::<FruitEatenEvent>()
            .add_message::<GameOverEvent>()
            .configure_sets(Update, (GameSet::Tick, GameSet::Scores).chain())
            .add_systems(Update, snake_tick.in_set(GameSet::Tick))
            .add_plugins(ScoresPlugin {
                path: dir.path().join("scores.json"),
            });
        app
    }

    fn run_frame(app: &mut App, delta: Duration) {
        app.world_mut().resource_mut::<Time>().advance_by(delta);
        app.update();
    }

    fn head(app: &App) -> Position {
        let state = app.world().resource::<GameState>();
        state.session.as_ref().map(|session| session.snake().head()).unwrap()
    }

    #[test]
    fn slow_frame_runs_every_elapsed_tick() {
        let dir = TempDir::new().unwrap();
        let arena = Arena {
            width: 20,
            height: 20,
        };
        let snake = Snake::new(Position::new(2, 10), 3, Direction::Right);
        let mut app = tick_app(&dir, quiet_match(arena, snake, 10), 10);

        run_frame(&mut app, Duration::from_millis(50));
        assert_eq!(head(&app), Position::new(2, 10));

        run_frame(&mut app, Duration::from_millis(300));
        assert_eq!(head(&app), Position::new(5, 10));
        assert_eq!(app.world().resource::<GameState>().phase, GamePhase::Playing);
    }

    #[test]
    fn fatal_tick_ends_the_match_and_records_the_score() {
        let dir = TempDir::new().unwrap();
        let arena = Arena {
            width: 5,
            height: 5,
        };
        let snake = Snake::new(Position::new(3, 2), 3, Direction::Right);
        let mut app = tick_app(&dir, quiet_match(arena, snake, 10), 10);

        // Two steps fall due; the second one hits the wall and nothing runs after it.
        run_frame(&mut app, Duration::from_millis(250));

        let state = app.world().resource::<GameState>();
        assert_eq!(state.phase, GamePhase::GameOver);
        let session = state.session.as_ref().unwrap();
        assert_eq!(session.cause(), Some(GameOverCause::Wall));
        assert_eq!(session.snake().head(), Position::new(5, 2));

        // Recorded in the same frame, before any screen is built.
        let scores = app.world().resource::<HighScores>();
        assert_eq!(scores.table.best("ada"), Some(0));
    }

    #[test]
    fn head_stays_inside_after_hitting_the_wall() {
        let arena = Arena {
            width: 5,
            height: 5,
        };
        let snake = Snake::new(Position::new(4, 2), 3, Direction::Right);
        let mut session = quiet_match(arena, snake, 10);
        assert!(matches!(
            session.tick(None, &mut StdRng::seed_from_u64(2)),
            TickOutcome::Over(GameOverCause::Wall)
        ));

        let mut app = App::new();
        let head = app
            .world_mut()
            .spawn((
                Position::new(4, 2),
                SnakeHead {
                    direction: Direction::Right,
                },
            ))
            .id();
        let first = app
            .world_mut()
            .spawn((Position::new(3, 2), SnakeSegment))
            .id();
        let second = app
            .world_mut()
            .spawn((Position::new(2, 2), SnakeSegment))
            .id();
        let mut state = playing(session);
        state.phase = GamePhase::GameOver;
        state.snake_segments = vec![head, first, second];
        app.insert_resource(state)
            .add_systems(Update, sync_snake_entities);

        app.update();

        let world = app.world();
        assert_eq!(world.get::<Position>(head), Some(&Position::new(4, 2)));
        assert_eq!(world.get::<Position>(first), Some(&Position::new(4, 2)));
        assert_eq!(world.get::<Position>(second), Some(&Position::new(3, 2)));
    }
}
