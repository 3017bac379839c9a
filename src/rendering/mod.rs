//! Rendering plugin - maps grid cells to the window, turns the head, and plays
//! the fruit effects.

use bevy::prelude::*;
use bevy_vector_shapes::prelude::*;

use crate::game::{
    CELL_SIZE, FRUIT_FLASH_COLOR, Fruit, FruitEatenEvent, FruitPulse, GameSet, Position,
    PulseEffect, SnakeHead, SnakeSegment, WINDOW_HEIGHT, WINDOW_WIDTH, Z_FRUIT, Z_SNAKE_HEAD,
    Z_SNAKE_SEGMENT,
};

/// Plugin for rendering and visual effects.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                position_translation,
                update_head_rotation,
                fruit_pulse_animation,
                spawn_fruit_eaten_effect,
                pulse_effect_system,
            )
                .chain()
                .in_set(GameSet::Sync),
        );
    }
}

// Type alias for the grid-to-window query
type GridTransformQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static Position,
        &'static mut Transform,
        Option<&'static SnakeHead>,
        Option<&'static SnakeSegment>,
    ),
    Changed<Position>,
>;

/// Window-space center of a grid cell. The playfield fills the window below the top bar.
pub fn cell_center(pos: Position) -> Vec2 {
    Vec2::new(
        -(WINDOW_WIDTH as f32) / 2.0 + (pos.x as f32 + 0.5) * CELL_SIZE,
        -(WINDOW_HEIGHT as f32) / 2.0 + (pos.y as f32 + 0.5) * CELL_SIZE,
    )
}

/// System to place moved entities on their cells.
fn position_translation(mut transforms: GridTransformQuery) {
    for (pos, mut transform, head, segment) in transforms.iter_mut() {
        // Set z-index based on entity type to ensure proper layering
        let z = if head.is_some() {
            Z_SNAKE_HEAD
        } else if segment.is_some() {
            Z_SNAKE_SEGMENT
        } else {
            Z_FRUIT
        };

        transform.translation = cell_center(*pos).extend(z);
    }
}

/// System to update snake head rotation based on direction.
fn update_head_rotation(mut heads: Query<(&SnakeHead, &mut Transform), Changed<SnakeHead>>) {
    for (head, mut transform) in heads.iter_mut() {
        transform.rotation = Quat::from_rotation_z(head.direction.angle());
    }
}

/// System to animate fruit with a pulsing effect.
fn fruit_pulse_animation(
    time: Res<Time>,
    mut fruits: Query<(&mut Transform, &mut FruitPulse), With<Fruit>>,
) {
    for (mut transform, mut pulse) in fruits.iter_mut() {
        pulse.timer.tick(time.delta());

        // Use sine wave for smooth pulsing
        let progress = pulse.timer.fraction();
        let scale = 1.0 + (progress * std::f32::consts::PI * 2.0).sin() * 0.15;

        transform.scale = Vec3::splat(scale);
    }
}

/// System to spawn visual effect when fruit is eaten.
fn spawn_fruit_eaten_effect(
    mut commands: Commands,
    mut fruit_eaten_reader: MessageReader<FruitEatenEvent>,
) {
    for event in fruit_eaten_reader.read() {
        commands.spawn((
            ShapeBundle::circle(
                &ShapeConfig {
                    color: FRUIT_FLASH_COLOR,
                    transform: Transform::from_translation(
                        cell_center(event.position).extend(Z_FRUIT + 0.5),
                    ),
                    ..ShapeConfig::default_2d()
                },
                CELL_SIZE / 2.0,
            ),
            PulseEffect {
                timer: Timer::from_seconds(0.3, TimerMode::Once),
                start_scale: 1.0,
                end_scale: 2.5,
            },
        ));
    }
}

/// System to handle pulse effects (for eaten fruit flash).
fn pulse_effect_system(
    mut commands: Commands,
    time: Res<Time>,
    mut effects: Query<(Entity, &mut Transform, &mut PulseEffect)>,
) {
    for (entity, mut transform, mut effect) in effects.iter_mut() {
        effect.timer.tick(time.delta());

        if effect.timer.is_finished() {
            commands.entity(entity).despawn();
        } else {
            let progress = effect.timer.fraction();
            let scale = effect.start_scale + (effect.end_scale - effect.start_scale) * progress;
            transform.scale = Vec3::splat(scale);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{ARENA_HEIGHT, ARENA_WIDTH, TOP_BAR_HEIGHT};

    #[test]
    fn playfield_sits_below_the_top_bar() {
        let bottom_left = cell_center(Position::new(0, 0));
        assert_eq!(bottom_left, Vec2::new(-395.0, -295.0));

        let top_right = cell_center(Position::new(ARENA_WIDTH as i32 - 1, ARENA_HEIGHT as i32 - 1));
        assert_eq!(top_right.x, 395.0);
        assert_eq!(
            top_right.y + CELL_SIZE / 2.0,
            WINDOW_HEIGHT as f32 / 2.0 - TOP_BAR_HEIGHT as f32
        );
    }
}
