//! Obstacle generation with a shrinking spawn interval
//!
//! One obstacle per interval. The interval decays with elapsed frames down to
//! a floor, so density only ever increases over a run.

use glam::Vec2;
use rand::Rng;

use super::state::{Obstacle, PlayArea, RunState, ShapeKind};
use crate::tuning::{ObstacleTuning, ShapeWeights};

/// Map a uniform roll in `[0, 1)` onto a shape by cumulative weight
pub fn choose_shape(roll: f32, weights: &ShapeWeights) -> ShapeKind {
    if roll < weights.block {
        ShapeKind::Block
    } else if roll < weights.block + weights.spire {
        ShapeKind::Spire
    } else {
        ShapeKind::Avalanche
    }
}

/// Build an obstacle of the given shape with randomized dimensions
pub fn build_obstacle<R: Rng>(
    kind: ShapeKind,
    rng: &mut R,
    area: &PlayArea,
    tuning: &ObstacleTuning,
) -> Obstacle {
    let entry_x = area.width + tuning.spawn_offset;
    match kind {
        ShapeKind::Block => Obstacle::Block {
            x: entry_x,
            size: Vec2::new(tuning.block_width.sample(rng), tuning.block_height.sample(rng)),
        },
        ShapeKind::Spire => Obstacle::Spire {
            x: entry_x,
            size: Vec2::new(tuning.spire_width.sample(rng), tuning.spire_height.sample(rng)),
        },
        ShapeKind::Avalanche => {
            let x = area.width * tuning.avalanche_x.sample(rng);
            Obstacle::Avalanche {
                pos: Vec2::new(x, tuning.avalanche_start_y),
                size: Vec2::new(
                    tuning.avalanche_width.sample(rng),
                    tuning.avalanche_height.sample(rng),
                ),
                vel_y: 0.0,
                falling: true,
            }
        }
    }
}

/// Roll a shape and build it
pub fn spawn_random<R: Rng>(rng: &mut R, area: &PlayArea, tuning: &ObstacleTuning) -> Obstacle {
    let kind = choose_shape(rng.random::<f32>(), &tuning.weights);
    build_obstacle(kind, rng, area, tuning)
}

/// Advance the spawn timer by one frame and spawn if it is due.
///
/// Expects `state.game_time` to already count the current frame. Returns the
/// shape spawned, if any.
pub fn step_spawner(state: &mut RunState) -> Option<ShapeKind> {
    state.spawn_timer += 1;
    if (state.spawn_timer as f32) < state.spawn_interval {
        return None;
    }

    state.spawn_timer = 0;
    state.spawn_interval = state
        .tuning
        .spawn_interval(state.game_time)
        .min(state.spawn_interval);

    if !state.area.is_valid() {
        log::debug!("Skipping spawn: play area has no extent");
        return None;
    }

    let obstacle = spawn_random(&mut state.rng, &state.area, &state.tuning.obstacles);
    let kind = obstacle.kind();
    log::debug!(
        "Spawned {} at frame {} (next interval {:.2})",
        kind.as_str(),
        state.game_time,
        state.spawn_interval
    );
    state.obstacles.push(obstacle);
    Some(kind)
}
