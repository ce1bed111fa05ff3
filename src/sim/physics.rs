//! Per-frame integration for the character and obstacles
//!
//! Explicit Euler with a unit frame step: velocity first, then position.

use super::state::{Character, Obstacle};

/// Apply gravity to the character and resolve the ground contact.
pub fn integrate_character(character: &mut Character, gravity: f32, ground_y: f32) {
    character.vel_y += gravity;
    character.pos.y += character.vel_y;

    let rest_y = character.rest_y(ground_y);
    if character.pos.y >= rest_y {
        character.pos.y = rest_y;
        character.vel_y = 0.0;
        character.grounded = true;
    } else {
        // Airborne, including after the ground line drops on resize
        character.grounded = false;
    }
}

/// Advance one obstacle. Falling avalanches drop straight down; everything on
/// the ground scrolls left by `speed`. Returns true if the obstacle landed
/// this frame.
pub fn advance_obstacle(obstacle: &mut Obstacle, speed: f32, fall_gravity: f32, ground_y: f32) -> bool {
    match obstacle {
        Obstacle::Block { x, .. } | Obstacle::Spire { x, .. } => {
            *x -= speed;
            false
        }
        Obstacle::Avalanche {
            pos,
            size,
            vel_y,
            falling,
        } => {
            if *falling {
                *vel_y += fall_gravity;
                pos.y += *vel_y;
                if pos.y + size.y >= ground_y {
                    pos.y = ground_y - size.y;
                    *vel_y = 0.0;
                    *falling = false;
                    return true;
                }
                false
            } else {
                pos.x -= speed;
                false
            }
        }
    }
}

/// Whether an obstacle has scrolled past the cull margin
#[inline]
pub fn is_offscreen(obstacle: &Obstacle, cull_margin: f32) -> bool {
    obstacle.x() + obstacle.size().x < cull_margin
}

/// Counts from one obstacle pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObstacleStep {
    pub landed: usize,
    pub culled: usize,
}

/// Advance every obstacle with a single speed for the frame, then drop the
/// ones that left the screen. Spawn order is preserved.
pub fn advance_obstacles(
    obstacles: &mut Vec<Obstacle>,
    speed: f32,
    fall_gravity: f32,
    ground_y: f32,
    cull_margin: f32,
) -> ObstacleStep {
    let mut step = ObstacleStep::default();
    for obstacle in obstacles.iter_mut() {
        if advance_obstacle(obstacle, speed, fall_gravity, ground_y) {
            step.landed += 1;
        }
    }

    let before = obstacles.len();
    obstacles.retain(|o| !is_offscreen(o, cull_margin));
    step.culled = before - obstacles.len();
    step
}
