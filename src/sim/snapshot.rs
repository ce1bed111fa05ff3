//! Read-only per-frame view for renderers and HUDs

use glam::Vec2;
use serde::Serialize;

use super::state::{PlayArea, RunMode, RunState, ShapeKind};

/// Character pose, derived from run mode and ground contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Pose {
    Run,
    Jump,
    /// Frozen once the run has ended
    Dead,
}

impl Pose {
    pub fn select(mode: RunMode, grounded: bool) -> Self {
        match (mode, grounded) {
            (RunMode::Dying | RunMode::Over, _) => Pose::Dead,
            (RunMode::Playing, true) => Pose::Run,
            (RunMode::Playing, false) => Pose::Jump,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CharacterView {
    /// Horizontal centre, top of hitbox
    pub pos: Vec2,
    pub size: Vec2,
    pub grounded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObstacleView {
    pub kind: ShapeKind,
    /// Top-left corner
    pub origin: Vec2,
    pub size: Vec2,
    pub falling: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub mode: RunMode,
    pub pose: Pose,
    pub character: CharacterView,
    /// Spawn order
    pub obstacles: Vec<ObstacleView>,
    pub distance: u64,
    pub ground_y: f32,
    pub area: PlayArea,
}

impl RunState {
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            mode: self.mode,
            pose: Pose::select(self.mode, self.character.grounded),
            character: CharacterView {
                pos: self.character.pos,
                size: self.character.size,
                grounded: self.character.grounded,
            },
            obstacles: self
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    kind: o.kind(),
                    origin: o.origin(self.ground_y),
                    size: o.size(),
                    falling: o.is_falling(),
                })
                .collect(),
            distance: self.distance,
            ground_y: self.ground_y,
            area: self.area,
        }
    }
}
