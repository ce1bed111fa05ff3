//! Per-frame simulation step
//!
//! Order within a frame: character physics, spawn, obstacle movement,
//! collision, run state transition, score. The whole step runs as one unit;
//! input only lands between frames.

use super::collision::{self, CollisionEvent};
use super::physics;
use super::spawn;
use super::state::{RunMode, RunState, ShapeKind};

/// What happened during one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub spawned: Option<ShapeKind>,
    pub landed: usize,
    pub culled: usize,
    /// Set on the single frame that ends the run
    pub death: Option<CollisionEvent>,
}

/// Advance the run by one frame. No-op once the run has left Playing.
pub fn tick(state: &mut RunState) -> TickReport {
    if state.mode != RunMode::Playing {
        return TickReport::default();
    }

    // One speed for every obstacle this frame
    let speed = state.scroll_speed();
    state.game_time += 1;

    physics::integrate_character(&mut state.character, state.tuning.gravity, state.ground_y);

    let spawned = spawn::step_spawner(state);

    let step = physics::advance_obstacles(
        &mut state.obstacles,
        speed,
        state.tuning.avalanche_gravity,
        state.ground_y,
        state.tuning.cull_margin,
    );

    let death = collision::detect(
        &state.character,
        &state.obstacles,
        state.ground_y,
        &state.tuning.hitbox,
    );

    state.distance = state.tuning.distance(state.game_time);

    if let Some(hit) = &death {
        log::debug!(
            "Hit {} #{} at frame {}",
            hit.kind.as_str(),
            hit.index,
            state.game_time
        );
        state.enter_dying();
    }

    TickReport {
        spawned,
        landed: step.landed,
        culled: step.culled,
        death,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    use crate::sim::state::{Obstacle, PlayArea};
    use crate::tuning::Tuning;

    /// Constant speed, no spontaneous spawns
    fn quiet_tuning() -> Tuning {
        Tuning {
            scroll_ramp: 0.0,
            spawn_interval_base: 1.0e9,
            spawn_interval_floor: 1.0e9,
            ground_y_ratio: 0.75,
            ..Tuning::default()
        }
    }

    fn quiet_run() -> RunState {
        // ground at 600
        RunState::new(quiet_tuning(), PlayArea::new(800.0, 800.0), 1)
    }

    #[test]
    fn test_ground_obstacle_hits_on_predicted_frame() {
        let mut state = quiet_run();
        assert_eq!(state.ground_y, 600.0);
        state.obstacles.push(Obstacle::Block {
            x: 800.0 + 40.0,
            size: Vec2::new(30.0, 40.0),
        });

        let hitbox_right = state.character.pos.x - 52.0 * 0.38 + 52.0 * 0.7;
        let expected = ((840.0 - hitbox_right) / 5.2).ceil() as u64;
        assert_eq!(expected, 131);

        for frame in 1..=expected {
            let report = tick(&mut state);
            if frame < expected {
                assert!(report.death.is_none(), "early hit at frame {frame}");
                assert_eq!(state.mode(), RunMode::Playing);
            } else {
                assert!(report.death.is_some(), "no hit at frame {frame}");
            }
        }
        assert_eq!(state.mode(), RunMode::Dying);
    }

    #[test]
    fn test_avalanche_scenario_lands_and_freezes_vertically() {
        let mut state = quiet_run();
        state.obstacles.push(Obstacle::Avalanche {
            pos: Vec2::new(600.0, -60.0),
            size: Vec2::new(60.0, 40.0),
            vel_y: 0.0,
            falling: true,
        });

        let mut landed_at = None;
        for frame in 1..=60u32 {
            if tick(&mut state).landed > 0 {
                landed_at = Some(frame);
                break;
            }
        }
        assert_eq!(landed_at, Some(50));
        assert!(!state.obstacles[0].is_falling());
        for _ in 0..10 {
            tick(&mut state);
            assert_eq!(state.obstacles[0].top(state.ground_y), 560.0);
        }
    }

    #[test]
    fn test_jump_scenario_lands_after_parabola() {
        let mut state = quiet_run();
        let rest = state.character.pos.y;
        assert!(state.request_jump());
        state.release_jump();

        for frame in 1..62 {
            tick(&mut state);
            assert!(!state.character.grounded, "grounded at frame {frame}");
        }
        tick(&mut state);
        assert!(state.character.grounded);
        assert_eq!(state.character.pos.y, rest);
    }

    #[test]
    fn test_death_freezes_everything() {
        let mut state = quiet_run();
        state.obstacles.push(Obstacle::Block {
            x: 140.0,
            size: Vec2::new(30.0, 40.0),
        });
        let report = tick(&mut state);
        assert!(report.death.is_some());
        assert_eq!(state.mode(), RunMode::Dying);

        let frozen_time = state.game_time;
        let frozen_obstacles = state.obstacles.clone();
        let frozen_character = state.character.clone();
        let frozen_distance = state.distance;

        assert!(!state.request_jump());
        for _ in 0..100 {
            assert_eq!(tick(&mut state), TickReport::default());
        }
        assert_eq!(state.game_time, frozen_time);
        assert_eq!(state.obstacles, frozen_obstacles);
        assert_eq!(state.character, frozen_character);
        assert_eq!(state.distance, frozen_distance);
        assert_eq!(state.deaths, 1);
    }

    #[test]
    fn test_dying_entered_at_most_once_over_long_run() {
        let mut state = RunState::new(Tuning::default(), PlayArea::new(800.0, 600.0), 99);
        let mut deaths = 0;
        for _ in 0..20_000 {
            if tick(&mut state).death.is_some() {
                deaths += 1;
            }
        }
        // Nobody jumps, so the run must end
        assert_eq!(deaths, 1);
        assert_eq!(state.deaths, 1);
        assert_eq!(state.mode(), RunMode::Dying);
    }

    #[test]
    fn test_distance_published_each_frame() {
        let mut state = quiet_run();
        for _ in 0..100 {
            tick(&mut state);
        }
        assert_eq!(state.game_time, 100);
        assert_eq!(state.distance, 28);
    }

    #[test]
    fn test_speed_read_once_per_frame() {
        let mut tuning = quiet_tuning();
        tuning.scroll_ramp = 0.5;
        let mut state = RunState::new(tuning, PlayArea::new(800.0, 800.0), 1);
        state.game_time = 10;
        state.obstacles.push(Obstacle::Block {
            x: 700.0,
            size: Vec2::new(30.0, 40.0),
        });
        state.obstacles.push(Obstacle::Spire {
            x: 500.0,
            size: Vec2::new(18.0, 60.0),
        });
        tick(&mut state);
        // 5.2 + 10 * 0.5 for both
        assert!((state.obstacles[0].x() - (700.0 - 10.2)).abs() < 1e-3);
        assert!((state.obstacles[1].x() - (500.0 - 10.2)).abs() < 1e-3);
    }
}
