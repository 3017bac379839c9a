//! Food plugin - keeps one fruit entity per active fruit cell.

use bevy::prelude::*;
use bevy_vector_shapes::prelude::*;

use crate::game::{CELL_SIZE, FRUIT_COLOR, Fruit, FruitPulse, GameSet, GameState, Position, Z_FRUIT};
use crate::rendering::cell_center;

/// Plugin for fruit-related systems.
pub struct FoodPlugin;

impl Plugin for FoodPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, sync_fruit_entities.in_set(GameSet::Sync));
    }
}

/// Spawns the entity drawing a fruit at `position`.
pub fn spawn_fruit_entity(commands: &mut Commands, position: Position) -> Entity {
    commands
        .spawn((
            ShapeBundle::rect(
                &ShapeConfig {
                    color: FRUIT_COLOR,
                    transform: Transform::from_translation(cell_center(position).extend(Z_FRUIT)),
                    ..ShapeConfig::default_2d()
                },
                Vec2::splat(CELL_SIZE),
            ),
            Fruit,
            position,
            FruitPulse {
                timer: Timer::from_seconds(0.8, TimerMode::Repeating),
            },
        ))
        .id()
}

/// System to despawn eaten fruit and spawn newly placed fruit.
fn sync_fruit_entities(
    mut commands: Commands,
    game_state: Res<GameState>,
    fruits: Query<(Entity, &Position), With<Fruit>>,
) {
    let wanted: &[Position] = match &game_state.session {
        Some(session) => session.fruits(),
        None => &[],
    };

    let mut shown = Vec::with_capacity(wanted.len());
    for (entity, position) in fruits.iter() {
        if wanted.contains(position) && !shown.contains(position) {
            shown.push(*position);
        } else {
            commands.entity(entity).despawn();
        }
    }

    for position in wanted {
        if !shown.contains(position) {
            spawn_fruit_entity(&mut commands, *position);
        }
    }
}
