//! Ice Runner - An endless side-scrolling avoidance game
//!
//! Core modules:
//! - `sim`: Per-frame simulation (physics, spawning, collisions, run state)
//! - `game`: Session owner (run lifecycle, input lease, death hand-off)
//! - `ui`: Screens and timed UI sequences
//! - `platform`: Raw input mapping
//! - `renderer`: Snapshot to draw data
//! - `tuning`: Data-driven game balance

pub mod game;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use game::{Frame, Game, GameEvent, InputLease};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Character gravity (px/frame²)
    pub const GRAVITY: f32 = 0.42;
    /// Vertical velocity applied on take-off (px/frame, negative is up)
    pub const JUMP_IMPULSE: f32 = -13.2;

    /// Scroll speed at frame 0 (px/frame)
    pub const SCROLL_BASE_SPEED: f32 = 5.2;
    /// Scroll speed gained per elapsed frame
    pub const SCROLL_RAMP: f32 = 0.0008;

    /// Character hitbox
    pub const CHARACTER_WIDTH: f32 = 52.0;
    pub const CHARACTER_HEIGHT: f32 = 64.0;
    /// Character x as a fraction of play area width
    pub const CHARACTER_X_RATIO: f32 = 0.18;

    /// Ground line as a fraction of play area height
    pub const GROUND_Y_RATIO: f32 = 0.78;

    /// Spawn interval (frames)
    pub const SPAWN_INTERVAL_BASE: f32 = 90.0;
    pub const SPAWN_INTERVAL_FLOOR: f32 = 48.0;
    pub const SPAWN_INTERVAL_DECAY: f32 = 0.02;

    /// Falling obstacle gravity (px/frame²)
    pub const AVALANCHE_GRAVITY: f32 = 0.5;
    /// Obstacles are culled once `x + width` drops below this
    pub const CULL_MARGIN: f32 = -80.0;

    /// Distance units per frame
    pub const DISTANCE_SCALE: f32 = 0.28;

    /// Frozen death pose hold before UI hand-off (ms)
    pub const DEATH_HOLD_MS: f64 = 900.0;
}
