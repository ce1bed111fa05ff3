//! Run-time simulation engine
//!
//! All gameplay logic lives here. No rendering, timers, or platform code:
//! - One `tick` per display frame
//! - Per-run session state, no globals
//! - Closed set of obstacle shapes, matched exhaustively

pub mod collision;
pub mod input;
pub mod physics;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, CollisionEvent, character_hitbox, detect, obstacle_hitbox};
pub use input::InputGate;
pub use snapshot::{CharacterView, FrameSnapshot, ObstacleView, Pose};
pub use state::{Character, Obstacle, PlayArea, RunMode, RunState, ShapeKind};
pub use tick::{TickReport, tick};
