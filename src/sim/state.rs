//! Run session state and core simulation types
//!
//! A [`RunState`] is created when a run starts and dropped when the next one
//! begins; nothing in it outlives the run.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::input::InputGate;
use crate::tuning::Tuning;

/// Authoritative run mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunMode {
    /// Simulation advancing, input accepted
    Playing,
    /// Collision happened; everything frozen, death pose held
    Dying,
    /// Terminal UI sequence handed off; engine idle
    Over,
}

/// Visible play surface in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

impl PlayArea {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Positive finite dimensions
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    #[inline]
    pub fn ground_y(&self, ratio: f32) -> f32 {
        self.height * ratio
    }
}

/// The player character. `pos.x` is the horizontal centre, `pos.y` the top of
/// the hitbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub pos: Vec2,
    pub vel_y: f32,
    pub grounded: bool,
    /// Nominal hitbox size
    pub size: Vec2,
}

impl Character {
    /// Character standing on the ground line
    pub fn new(x: f32, ground_y: f32, size: Vec2) -> Self {
        Self {
            pos: Vec2::new(x, ground_y - size.y),
            vel_y: 0.0,
            grounded: true,
            size,
        }
    }

    /// Lowest allowed `pos.y` for a ground line
    #[inline]
    pub fn rest_y(&self, ground_y: f32) -> f32 {
        ground_y - self.size.y
    }

    /// Leave the ground with the given vertical impulse
    pub fn launch(&mut self, impulse: f32) {
        self.vel_y = impulse;
        self.grounded = false;
    }
}

/// Obstacle shape tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Block,
    Spire,
    Avalanche,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Block, ShapeKind::Spire, ShapeKind::Avalanche];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Block => "block",
            ShapeKind::Spire => "spire",
            ShapeKind::Avalanche => "avalanche",
        }
    }
}

/// A live obstacle. Ground obstacles only store `x`; their top is always
/// `ground_y - size.y`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Obstacle {
    /// Rectangular ice block resting on the ground
    Block { x: f32, size: Vec2 },
    /// Ice spire resting on the ground (triangle when drawn, box when hit)
    Spire { x: f32, size: Vec2 },
    /// Rock cluster dropping straight down, then scrolling with the ground
    Avalanche {
        pos: Vec2,
        size: Vec2,
        vel_y: f32,
        falling: bool,
    },
}

impl Obstacle {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Obstacle::Block { .. } => ShapeKind::Block,
            Obstacle::Spire { .. } => ShapeKind::Spire,
            Obstacle::Avalanche { .. } => ShapeKind::Avalanche,
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        match self {
            Obstacle::Block { x, .. } | Obstacle::Spire { x, .. } => *x,
            Obstacle::Avalanche { pos, .. } => pos.x,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        match self {
            Obstacle::Block { size, .. }
            | Obstacle::Spire { size, .. }
            | Obstacle::Avalanche { size, .. } => *size,
        }
    }

    #[inline]
    pub fn is_falling(&self) -> bool {
        matches!(self, Obstacle::Avalanche { falling: true, .. })
    }

    /// Current top edge
    pub fn top(&self, ground_y: f32) -> f32 {
        match self {
            Obstacle::Avalanche {
                pos, falling: true, ..
            } => pos.y,
            _ => ground_y - self.size().y,
        }
    }

    /// Top-left corner at the current frame
    pub fn origin(&self, ground_y: f32) -> Vec2 {
        Vec2::new(self.x(), self.top(ground_y))
    }
}

/// Per-run session state
#[derive(Debug, Clone)]
pub struct RunState {
    /// Balance for this run (fixed at run start)
    pub tuning: Tuning,
    pub seed: u64,
    pub area: PlayArea,
    /// Ground line derived from `area`
    pub ground_y: f32,
    pub character: Character,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Elapsed simulated frames
    pub game_time: u64,
    /// Frames since the last spawn
    pub spawn_timer: u32,
    /// Published distance score
    pub distance: u64,
    /// Number of Playing -> Dying transitions (never exceeds 1)
    pub deaths: u32,
    pub(crate) spawn_interval: f32,
    pub(crate) mode: RunMode,
    pub(crate) input: InputGate,
    pub(crate) rng: Pcg32,
}

impl RunState {
    /// Fresh run: character grounded at its start column, no obstacles
    pub fn new(tuning: Tuning, area: PlayArea, seed: u64) -> Self {
        let ground_y = area.ground_y(tuning.ground_y_ratio);
        let character = Character::new(
            area.width * tuning.character_x_ratio,
            ground_y,
            Vec2::new(tuning.character_width, tuning.character_height),
        );
        let spawn_interval = tuning.spawn_interval_base;

        Self {
            tuning,
            seed,
            area,
            ground_y,
            character,
            obstacles: Vec::new(),
            game_time: 0,
            spawn_timer: 0,
            distance: 0,
            deaths: 0,
            spawn_interval,
            mode: RunMode::Playing,
            input: InputGate::default(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn mode(&self) -> RunMode {
        self.mode
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.mode == RunMode::Playing
    }

    /// Current spawn interval in frames
    #[inline]
    pub fn spawn_interval(&self) -> f32 {
        self.spawn_interval
    }

    /// Scroll speed for the frame about to run
    #[inline]
    pub fn scroll_speed(&self) -> f32 {
        self.tuning.scroll_speed(self.game_time)
    }

    /// Whether a jump is held (pressed and not yet released)
    #[inline]
    pub fn jump_pending(&self) -> bool {
        self.input.is_pending()
    }

    /// Edge-triggered jump. Returns true if the character took off.
    pub fn request_jump(&mut self) -> bool {
        if self.mode != RunMode::Playing {
            return false;
        }
        self.input
            .request_jump(&mut self.character, self.tuning.jump_impulse)
    }

    /// Clear the pending jump; idempotent
    pub fn release_jump(&mut self) {
        if self.mode != RunMode::Playing {
            return;
        }
        self.input.release_jump();
    }

    /// Adopt new surface dimensions. Ground and spawn geometry follow on the
    /// next frame; committed positions are left untouched. A run that has left
    /// Playing stays frozen and refuses the change.
    pub fn set_area(&mut self, area: PlayArea) -> bool {
        if self.mode != RunMode::Playing {
            log::debug!("Run is {:?}; keeping play area", self.mode);
            return false;
        }
        if !area.is_valid() {
            log::warn!(
                "Ignoring invalid play area {}x{}",
                area.width,
                area.height
            );
            return false;
        }
        self.area = area;
        self.ground_y = area.ground_y(self.tuning.ground_y_ratio);
        log::debug!(
            "Play area resized to {}x{} (ground {})",
            area.width,
            area.height,
            self.ground_y
        );
        true
    }

    /// Playing -> Dying. Returns false if the run already left Playing.
    pub(crate) fn enter_dying(&mut self) -> bool {
        if self.mode != RunMode::Playing {
            return false;
        }
        self.mode = RunMode::Dying;
        self.deaths += 1;
        self.input.detach();
        log::info!(
            "Run over at distance {} after {} frames",
            self.distance,
            self.game_time
        );
        true
    }

    /// Dying -> Over once the terminal UI sequence has taken over
    pub fn hand_off(&mut self) -> bool {
        if self.mode != RunMode::Dying {
            return false;
        }
        self.mode = RunMode::Over;
        log::info!("Death sequence handed off");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_run_is_grounded_and_empty() {
        let state = RunState::new(Tuning::default(), PlayArea::new(800.0, 600.0), 7);
        assert_eq!(state.mode(), RunMode::Playing);
        assert!(state.character.grounded);
        assert_eq!(state.character.pos.x, 800.0 * 0.18);
        assert_eq!(state.character.pos.y, state.ground_y - 64.0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.game_time, 0);
        assert_eq!(state.spawn_timer, 0);
        assert_eq!(state.spawn_interval(), 90.0);
    }

    #[test]
    fn test_hand_off_requires_dying() {
        let mut state = RunState::new(Tuning::default(), PlayArea::new(800.0, 600.0), 7);
        assert!(!state.hand_off());
        assert!(state.enter_dying());
        assert!(!state.enter_dying());
        assert!(state.hand_off());
        assert!(!state.hand_off());
        assert_eq!(state.mode(), RunMode::Over);
        assert_eq!(state.deaths, 1);
    }

    #[test]
    fn test_set_area_rejects_degenerate() {
        let mut state = RunState::new(Tuning::default(), PlayArea::new(800.0, 600.0), 7);
        let ground = state.ground_y;
        assert!(!state.set_area(PlayArea::new(0.0, 600.0)));
        assert!(!state.set_area(PlayArea::new(800.0, f32::NAN)));
        assert_eq!(state.ground_y, ground);

        assert!(state.set_area(PlayArea::new(1000.0, 1000.0)));
        assert!((state.ground_y - 780.0).abs() < 1e-3);
        // Character keeps its committed position
        assert_eq!(state.character.pos.x, 800.0 * 0.18);
    }

    #[test]
    fn test_set_area_refused_after_death() {
        let mut state = RunState::new(Tuning::default(), PlayArea::new(800.0, 600.0), 7);
        state.obstacles.push(Obstacle::Block {
            x: 500.0,
            size: Vec2::new(30.0, 40.0),
        });
        let ground = state.ground_y;
        let top = state.obstacles[0].top(ground);
        assert!(state.enter_dying());

        assert!(!state.set_area(PlayArea::new(800.0, 900.0)));
        assert_eq!(state.area, PlayArea::new(800.0, 600.0));
        assert_eq!(state.ground_y, ground);
        assert_eq!(state.obstacles[0].top(state.ground_y), top);

        state.hand_off();
        assert!(!state.set_area(PlayArea::new(800.0, 900.0)));
        assert_eq!(state.ground_y, ground);
    }

    #[test]
    fn test_grounded_obstacle_top_tracks_ground() {
        let block = Obstacle::Block {
            x: 10.0,
            size: Vec2::new(30.0, 40.0),
        };
        assert_eq!(block.top(600.0), 560.0);
        assert_eq!(block.top(500.0), 460.0);

        let rocks = Obstacle::Avalanche {
            pos: Vec2::new(10.0, -60.0),
            size: Vec2::new(60.0, 30.0),
            vel_y: 0.0,
            falling: true,
        };
        assert_eq!(rocks.top(600.0), -60.0);
        assert!(rocks.is_falling());
        assert_eq!(rocks.kind(), ShapeKind::Avalanche);
    }
}
