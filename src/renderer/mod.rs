//! Snapshot to draw data
//!
//! Turns a [`FrameSnapshot`] into a colored triangle list plus a sprite
//! placement for the character. No gameplay logic and no GPU calls; a host
//! uploads `Scene::vertices` as-is.

pub mod shapes;
pub mod vertex;

pub use vertex::Vertex;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{FrameSnapshot, ObstacleView, Pose, ShapeKind};
use vertex::colors;

/// Natural pixel size of a loaded sprite image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteMeta {
    pub width: f32,
    pub height: f32,
}

impl SpriteMeta {
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    fn is_usable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.aspect().is_finite()
    }
}

/// Character sprites; `None` until the asset has loaded
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpriteSet {
    pub run: Option<SpriteMeta>,
    pub jump: Option<SpriteMeta>,
    pub dead: Option<SpriteMeta>,
}

impl SpriteSet {
    pub fn for_pose(&self, pose: Pose) -> Option<SpriteMeta> {
        match pose {
            Pose::Run => self.run,
            Pose::Jump => self.jump,
            Pose::Dead => self.dead,
        }
    }
}

/// Where to blit the character sprite this frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpriteDraw {
    pub pose: Pose,
    /// Top-left corner
    pub origin: Vec2,
    pub size: Vec2,
}

/// Everything a host needs to draw one frame
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub vertices: Vec<Vertex>,
    /// `None` when the pose's sprite is not available
    pub character: Option<SpriteDraw>,
}

impl Scene {
    pub fn build(snapshot: &FrameSnapshot, sprites: &SpriteSet) -> Self {
        let mut vertices = background(snapshot);
        for obstacle in &snapshot.obstacles {
            vertices.extend(obstacle_shape(obstacle));
        }

        let character = place_character(snapshot, sprites);
        if let Some(draw) = &character {
            let center = Vec2::new(snapshot.character.pos.x, snapshot.ground_y + 2.0);
            vertices.extend(shapes::ellipse(
                center,
                Vec2::new(draw.size.x * 0.42, 4.0),
                0.0,
                colors::SHADOW,
            ));
        }

        Self {
            vertices,
            character,
        }
    }
}

fn background(snapshot: &FrameSnapshot) -> Vec<Vertex> {
    let w = snapshot.area.width;
    let h = snapshot.area.height;
    let ground = snapshot.ground_y;

    let mut vertices = shapes::rect(Vec2::ZERO, Vec2::new(w, h), colors::SKY);
    vertices.extend(shapes::rect(
        Vec2::new(0.0, ground),
        Vec2::new(w, (h - ground).max(0.0)),
        colors::GROUND,
    ));
    vertices.extend(shapes::rect(
        Vec2::new(0.0, ground - 0.5),
        Vec2::new(w, 1.0),
        colors::GROUND_LINE,
    ));
    vertices
}

fn obstacle_shape(o: &ObstacleView) -> Vec<Vertex> {
    let origin = o.origin;
    let Vec2 { x: w, y: h } = o.size;

    match o.kind {
        ShapeKind::Block => {
            let mut v = shapes::rect(origin, o.size, colors::BLOCK);
            if w > 4.0 {
                v.extend(shapes::rect(
                    origin + Vec2::new(2.0, 2.0),
                    Vec2::new(w - 4.0, 4.0),
                    colors::BLOCK_HIGHLIGHT,
                ));
            }
            v
        }
        ShapeKind::Spire => {
            let mut v = shapes::triangle(
                origin + Vec2::new(w * 0.5, 0.0),
                origin + Vec2::new(w, h),
                origin + Vec2::new(0.0, h),
                colors::SPIRE,
            );
            v.extend(shapes::triangle(
                origin + Vec2::new(w * 0.5, 6.0),
                origin + Vec2::new(w * 0.7, h * 0.4),
                origin + Vec2::new(w * 0.5 + 1.0, h * 0.35),
                colors::SPIRE_GLINT,
            ));
            v
        }
        ShapeKind::Avalanche => {
            let mut v = shapes::ellipse(
                origin + Vec2::new(w * 0.35, h * 0.5),
                Vec2::new(w * 0.38, h * 0.52),
                -0.2,
                colors::ROCK_DARK,
            );
            v.extend(shapes::ellipse(
                origin + Vec2::new(w * 0.68, h * 0.55),
                Vec2::new(w * 0.30, h * 0.42),
                0.15,
                colors::ROCK_MID,
            ));
            v.extend(shapes::ellipse(
                origin + Vec2::new(w * 0.5, h * 0.25),
                Vec2::new(w * 0.25, h * 0.32),
                0.1,
                colors::ROCK_LIGHT,
            ));
            if o.falling {
                v.extend(shapes::ellipse(
                    origin + Vec2::new(w * 0.5, 0.0),
                    Vec2::new(w * 0.45, 6.0),
                    0.0,
                    colors::DUST,
                ));
            }
            v
        }
    }
}

/// Sprite placement per pose. Missing or broken sprites skip the character for
/// this frame.
fn place_character(snapshot: &FrameSnapshot, sprites: &SpriteSet) -> Option<SpriteDraw> {
    let pose = snapshot.pose;
    let Some(meta) = sprites.for_pose(pose).filter(SpriteMeta::is_usable) else {
        log::trace!("No sprite for {:?}; skipping character draw", pose);
        return None;
    };

    let c = &snapshot.character;
    let (height, top) = match pose {
        Pose::Run => (c.size.y, c.pos.y),
        Pose::Jump => {
            let h = c.size.y * 1.05;
            (h, c.pos.y - h * 0.08)
        }
        Pose::Dead => {
            // Squat pose resting on the ground
            let h = c.size.y * 0.55;
            (h, snapshot.ground_y - h)
        }
    };
    let width = meta.aspect() * height;

    Some(SpriteDraw {
        pose,
        origin: Vec2::new(c.pos.x - width * 0.5, top),
        size: Vec2::new(width, height),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Obstacle, PlayArea, RunState, tick};
    use crate::tuning::Tuning;

    fn sprites() -> SpriteSet {
        let meta = SpriteMeta {
            width: 100.0,
            height: 100.0,
        };
        SpriteSet {
            run: Some(meta),
            jump: Some(meta),
            dead: Some(SpriteMeta {
                width: 200.0,
                height: 100.0,
            }),
        }
    }

    fn run() -> RunState {
        RunState::new(Tuning::default(), PlayArea::new(800.0, 600.0), 3)
    }

    #[test]
    fn test_run_sprite_anchored_on_hitbox_top() {
        let state = run();
        let scene = Scene::build(&state.snapshot(), &sprites());
        let draw = scene.character.expect("character drawn");
        assert_eq!(draw.pose, Pose::Run);
        assert_eq!(draw.size, Vec2::new(64.0, 64.0));
        assert_eq!(
            draw.origin,
            Vec2::new(state.character.pos.x - 32.0, state.character.pos.y)
        );
    }

    #[test]
    fn test_missing_sprite_skips_character_only() {
        let mut state = run();
        state.obstacles.push(Obstacle::Block {
            x: 500.0,
            size: Vec2::new(30.0, 40.0),
        });
        let no_sprites = SpriteSet::default();
        let with = Scene::build(&state.snapshot(), &sprites());
        let without = Scene::build(&state.snapshot(), &no_sprites);
        assert!(without.character.is_none());
        // Background + block still drawn, only the shadow is gone
        assert_eq!(
            with.vertices.len() - without.vertices.len(),
            shapes::ELLIPSE_SEGMENTS * 3
        );

        // Simulation is unaffected by rendering
        let before = state.game_time;
        tick(&mut state);
        assert_eq!(state.game_time, before + 1);
    }

    #[test]
    fn test_dead_pose_sits_on_ground() {
        let mut state = run();
        state.obstacles.push(Obstacle::Block {
            x: 140.0,
            size: Vec2::new(30.0, 40.0),
        });
        tick(&mut state);
        let snap = state.snapshot();
        assert_eq!(snap.pose, Pose::Dead);
        let draw = Scene::build(&snap, &sprites()).character.expect("drawn");
        assert!((draw.origin.y + draw.size.y - snap.ground_y).abs() < 1e-3);
        assert!((draw.size.x - 2.0 * 64.0 * 0.55).abs() < 1e-3);
    }

    #[test]
    fn test_falling_avalanche_has_dust() {
        let falling = ObstacleView {
            kind: ShapeKind::Avalanche,
            origin: Vec2::new(300.0, 10.0),
            size: Vec2::new(60.0, 30.0),
            falling: true,
        };
        let landed = ObstacleView {
            falling: false,
            ..falling
        };
        assert_eq!(
            obstacle_shape(&falling).len(),
            obstacle_shape(&landed).len() + shapes::ELLIPSE_SEGMENTS * 3
        );
    }
}
