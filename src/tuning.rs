//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. Defaults match [`crate::consts`];
//! a JSON file may override any subset of fields.

use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl TuningError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Half-open value range `[min, max)`. `min == max` yields a fixed value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub const fn fixed(value: f32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Uniform sample in the span
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f32 {
        self.min + rng.random::<f32>() * (self.max - self.min)
    }

    fn check(&self, field: &'static str) -> Result<(), TuningError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(TuningError::invalid(field, "bounds must be finite"));
        }
        if self.min > self.max {
            return Err(TuningError::invalid(
                field,
                format!("min {} exceeds max {}", self.min, self.max),
            ));
        }
        Ok(())
    }
}

/// Character hitbox shrink, as fractions of the nominal size.
///
/// Horizontal extent is `[x - anchor*w + trailing*w, x - anchor*w + leading*w]`,
/// vertical extent is `[y, y + bottom*h]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitboxInsets {
    pub anchor: f32,
    pub leading: f32,
    pub trailing: f32,
    pub bottom: f32,
}

impl Default for HitboxInsets {
    fn default() -> Self {
        Self {
            anchor: 0.38,
            leading: 0.7,
            trailing: 0.12,
            bottom: 0.88,
        }
    }
}

impl HitboxInsets {
    /// The shrunk box must keep a positive area, or nothing could ever hit
    pub fn check(&self) -> Result<(), TuningError> {
        let all = [self.anchor, self.leading, self.trailing, self.bottom];
        if all.iter().any(|v| !v.is_finite()) {
            return Err(TuningError::invalid("hitbox", "insets must be finite"));
        }
        if self.trailing >= self.leading {
            return Err(TuningError::invalid(
                "hitbox",
                format!("trailing {} must be below leading {}", self.trailing, self.leading),
            ));
        }
        if !(self.bottom > 0.0 && self.bottom <= 1.0) {
            return Err(TuningError::invalid("hitbox.bottom", "must be within (0, 1]"));
        }
        Ok(())
    }
}

/// Relative frequency of each obstacle shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeWeights {
    pub block: f32,
    pub spire: f32,
    pub avalanche: f32,
}

impl Default for ShapeWeights {
    fn default() -> Self {
        Self {
            block: 0.45,
            spire: 0.30,
            avalanche: 0.25,
        }
    }
}

/// Obstacle dimensions and spawn placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleTuning {
    pub weights: ShapeWeights,
    pub block_width: Span,
    pub block_height: Span,
    pub spire_width: Span,
    pub spire_height: Span,
    pub avalanche_width: Span,
    pub avalanche_height: Span,
    /// Ground obstacles spawn this far past the right edge
    pub spawn_offset: f32,
    /// Avalanche x as a fraction of play area width
    pub avalanche_x: Span,
    /// Avalanche starting y (above the visible area)
    pub avalanche_start_y: f32,
}

impl Default for ObstacleTuning {
    fn default() -> Self {
        Self {
            weights: ShapeWeights::default(),
            block_width: Span::new(28.0, 46.0),
            block_height: Span::new(30.0, 60.0),
            spire_width: Span::fixed(18.0),
            spire_height: Span::new(55.0, 85.0),
            avalanche_width: Span::new(50.0, 90.0),
            avalanche_height: Span::new(28.0, 48.0),
            spawn_offset: 40.0,
            avalanche_x: Span::new(0.5, 0.85),
            avalanche_start_y: -60.0,
        }
    }
}

/// Death sequence timing (ms). Text/menu delays are measured from hand-off.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeathTiming {
    pub hold_ms: f64,
    pub text_in_ms: f64,
    pub text_out_ms: f64,
    pub menu_ms: f64,
}

impl Default for DeathTiming {
    fn default() -> Self {
        Self {
            hold_ms: DEATH_HOLD_MS,
            text_in_ms: 200.0,
            text_out_ms: 3800.0,
            menu_ms: 5600.0,
        }
    }
}

/// Complete gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    pub jump_impulse: f32,
    pub scroll_base_speed: f32,
    pub scroll_ramp: f32,
    pub character_width: f32,
    pub character_height: f32,
    pub character_x_ratio: f32,
    pub ground_y_ratio: f32,
    pub spawn_interval_base: f32,
    pub spawn_interval_floor: f32,
    pub spawn_interval_decay: f32,
    pub avalanche_gravity: f32,
    pub cull_margin: f32,
    pub distance_scale: f32,
    pub hitbox: HitboxInsets,
    pub obstacles: ObstacleTuning,
    pub death: DeathTiming,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            scroll_base_speed: SCROLL_BASE_SPEED,
            scroll_ramp: SCROLL_RAMP,
            character_width: CHARACTER_WIDTH,
            character_height: CHARACTER_HEIGHT,
            character_x_ratio: CHARACTER_X_RATIO,
            ground_y_ratio: GROUND_Y_RATIO,
            spawn_interval_base: SPAWN_INTERVAL_BASE,
            spawn_interval_floor: SPAWN_INTERVAL_FLOOR,
            spawn_interval_decay: SPAWN_INTERVAL_DECAY,
            avalanche_gravity: AVALANCHE_GRAVITY,
            cull_margin: CULL_MARGIN,
            distance_scale: DISTANCE_SCALE,
            hitbox: HitboxInsets::default(),
            obstacles: ObstacleTuning::default(),
            death: DeathTiming::default(),
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Check physical sanity of every value
    pub fn validate(&self) -> Result<(), TuningError> {
        let non_negative = [
            ("gravity", self.gravity),
            ("scroll_base_speed", self.scroll_base_speed),
            ("scroll_ramp", self.scroll_ramp),
            ("spawn_interval_decay", self.spawn_interval_decay),
            ("avalanche_gravity", self.avalanche_gravity),
            ("distance_scale", self.distance_scale),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(TuningError::invalid(field, format!("{value} must be >= 0")));
            }
        }

        if !self.jump_impulse.is_finite() || self.jump_impulse >= 0.0 {
            return Err(TuningError::invalid("jump_impulse", "must point upward (< 0)"));
        }
        if !(self.character_width > 0.0 && self.character_width.is_finite())
            || !(self.character_height > 0.0 && self.character_height.is_finite())
        {
            return Err(TuningError::invalid("character size", "must be positive"));
        }
        if !(0.0..=1.0).contains(&self.ground_y_ratio) {
            return Err(TuningError::invalid("ground_y_ratio", "must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.character_x_ratio) {
            return Err(TuningError::invalid("character_x_ratio", "must be within [0, 1]"));
        }
        // Obstacles must be fully off the left edge before they are dropped
        if !self.cull_margin.is_finite() || self.cull_margin > 0.0 {
            return Err(TuningError::invalid("cull_margin", "must be <= 0"));
        }
        self.hitbox.check()?;
        if self.spawn_interval_floor < 1.0 {
            return Err(TuningError::invalid("spawn_interval_floor", "must be >= 1 frame"));
        }
        if self.spawn_interval_floor > self.spawn_interval_base {
            return Err(TuningError::invalid(
                "spawn_interval_floor",
                "must not exceed spawn_interval_base",
            ));
        }

        let o = &self.obstacles;
        o.block_width.check("obstacles.block_width")?;
        o.block_height.check("obstacles.block_height")?;
        o.spire_width.check("obstacles.spire_width")?;
        o.spire_height.check("obstacles.spire_height")?;
        o.avalanche_width.check("obstacles.avalanche_width")?;
        o.avalanche_height.check("obstacles.avalanche_height")?;
        o.avalanche_x.check("obstacles.avalanche_x")?;

        let w = o.weights;
        if w.block < 0.0 || w.spire < 0.0 || w.avalanche < 0.0 {
            return Err(TuningError::invalid("obstacles.weights", "must be non-negative"));
        }
        let total = w.block + w.spire + w.avalanche;
        if (total - 1.0).abs() > 1e-3 {
            return Err(TuningError::invalid(
                "obstacles.weights",
                format!("sum to {total}, expected 1"),
            ));
        }

        Ok(())
    }

    /// Scroll speed at a given elapsed frame count
    #[inline]
    pub fn scroll_speed(&self, game_time: u64) -> f32 {
        self.scroll_base_speed + game_time as f32 * self.scroll_ramp
    }

    /// Spawn interval after a spawn at the given elapsed frame count
    #[inline]
    pub fn spawn_interval(&self, game_time: u64) -> f32 {
        (self.spawn_interval_base - game_time as f32 * self.spawn_interval_decay)
            .max(self.spawn_interval_floor)
    }

    /// Integer distance published for an elapsed frame count
    #[inline]
    pub fn distance(&self, game_time: u64) -> u64 {
        (game_time as f64 * self.distance_scale as f64).floor() as u64
    }
}
