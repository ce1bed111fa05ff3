//! Axis-aligned hitbox tests
//!
//! The character hitbox is shrunk inside the sprite bounds so grazes don't
//! kill. Edges that merely touch do not overlap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Character, Obstacle, ShapeKind};
use crate::tuning::HitboxInsets;

/// Axis-aligned box, `min` top-left and `max` bottom-right (screen space, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    /// Strict overlap: shared edges are not a hit
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.max.x > other.min.x
            && self.min.x < other.max.x
            && self.max.y > other.min.y
            && self.min.y < other.max.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// Shrunk character hitbox
pub fn character_hitbox(character: &Character, insets: &HitboxInsets) -> Aabb {
    let w = character.size.x;
    let h = character.size.y;
    let left_anchor = character.pos.x - w * insets.anchor;
    Aabb::new(
        Vec2::new(left_anchor + w * insets.trailing, character.pos.y),
        Vec2::new(left_anchor + w * insets.leading, character.pos.y + h * insets.bottom),
    )
}

/// Obstacle hitbox at its live position. Spires use their bounding box.
pub fn obstacle_hitbox(obstacle: &Obstacle, ground_y: f32) -> Aabb {
    Aabb::from_origin_size(obstacle.origin(ground_y), obstacle.size())
}

/// First obstacle touching the character this frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionEvent {
    /// Slot in the live obstacle list
    pub index: usize,
    pub kind: ShapeKind,
    pub obstacle_box: Aabb,
}

/// Test the character against every live obstacle. At most one event per
/// frame, however many obstacles overlap.
pub fn detect(
    character: &Character,
    obstacles: &[Obstacle],
    ground_y: f32,
    insets: &HitboxInsets,
) -> Option<CollisionEvent> {
    let hitbox = character_hitbox(character, insets);
    obstacles.iter().enumerate().find_map(|(index, obstacle)| {
        let obstacle_box = obstacle_hitbox(obstacle, ground_y);
        hitbox.overlaps(&obstacle_box).then(|| CollisionEvent {
            index,
            kind: obstacle.kind(),
            obstacle_box,
        })
    })
}
