//! Raw keyboard/pointer events to jump requests
//!
//! Only the space key and the primary pointer count. The router holds the run's
//! [`InputLease`] and lets go of it as soon as the game stops accepting input.

use crate::game::{Game, InputLease};

/// Key name reported by hosts for the space bar
pub const JUMP_KEY: &str = " ";

/// Host input event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
    KeyDown { key: String, repeat: bool },
    KeyUp { key: String },
    PointerDown,
    PointerUp,
}

/// What the host should do with the original event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputResponse {
    /// Event reached the game
    pub routed: bool,
    /// Host should suppress the event's default action (page scroll, focus)
    pub prevent_default: bool,
}

#[derive(Debug, Default)]
pub struct InputRouter {
    lease: Option<InputLease>,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a freshly started run's input
    pub fn attach(&mut self, lease: InputLease) {
        self.lease = Some(lease);
    }

    pub fn detach(&mut self) {
        self.lease = None;
    }

    pub fn is_attached(&self) -> bool {
        self.lease.is_some()
    }

    pub fn handle(&mut self, game: &mut Game, event: &RawInput) -> InputResponse {
        let prevent_default = match event {
            RawInput::KeyDown { key, .. } => key == JUMP_KEY,
            RawInput::PointerDown => true,
            RawInput::KeyUp { .. } | RawInput::PointerUp => false,
        };

        if !game.accepts_input() {
            if self.lease.take().is_some() {
                log::debug!("Input detached: run no longer playing");
            }
            return InputResponse {
                routed: false,
                prevent_default,
            };
        }

        let Some(lease) = self.lease.as_ref() else {
            return InputResponse {
                routed: false,
                prevent_default,
            };
        };

        let routed = match event {
            RawInput::KeyDown { key, repeat } if key == JUMP_KEY => {
                if *repeat {
                    log::trace!("Swallowing auto-repeat of the jump key");
                } else {
                    game.request_jump(lease);
                }
                true
            }
            RawInput::KeyUp { key } if key == JUMP_KEY => {
                game.release_jump(lease);
                true
            }
            RawInput::PointerDown => {
                game.request_jump(lease);
                true
            }
            RawInput::PointerUp => {
                game.release_jump(lease);
                true
            }
            RawInput::KeyDown { .. } | RawInput::KeyUp { .. } => false,
        };

        InputResponse {
            routed,
            prevent_default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;

    fn space_down() -> RawInput {
        RawInput::KeyDown {
            key: JUMP_KEY.to_string(),
            repeat: false,
        }
    }

    fn setup() -> (Game, InputRouter) {
        let mut game = Game::new(Tuning::default(), 800.0, 600.0).with_seed(1);
        let mut router = InputRouter::new();
        router.attach(game.start_run());
        (game, router)
    }

    #[test]
    fn test_space_jumps_and_suppresses_default() {
        let (mut game, mut router) = setup();
        let resp = router.handle(&mut game, &space_down());
        assert!(resp.routed);
        assert!(resp.prevent_default);
        assert!(!game.session().expect("run").character.grounded);
    }

    #[test]
    fn test_other_keys_ignored() {
        let (mut game, mut router) = setup();
        let resp = router.handle(
            &mut game,
            &RawInput::KeyDown {
                key: "ArrowUp".to_string(),
                repeat: false,
            },
        );
        assert_eq!(resp, InputResponse::default());
        assert!(game.session().expect("run").character.grounded);
    }

    #[test]
    fn test_key_repeat_does_not_rejump() {
        let (mut game, mut router) = setup();
        router.handle(&mut game, &space_down());
        for i in 0..70 {
            game.frame(i as f64 * 16.0);
            router.handle(
                &mut game,
                &RawInput::KeyDown {
                    key: JUMP_KEY.to_string(),
                    repeat: true,
                },
            );
        }
        // Landed while still held: stays on the ground
        assert!(game.session().expect("run").character.grounded);
    }

    #[test]
    fn test_repeat_is_never_a_fresh_press() {
        let (mut game, mut router) = setup();
        router.handle(&mut game, &space_down());
        for i in 0..70 {
            game.frame(i as f64 * 16.0);
        }
        // Pointer release clears the gate while the key is still physically down
        router.handle(&mut game, &RawInput::PointerUp);
        let response = router.handle(
            &mut game,
            &RawInput::KeyDown {
                key: JUMP_KEY.to_string(),
                repeat: true,
            },
        );
        assert!(response.routed);
        assert!(response.prevent_default);
        let session = game.session().expect("run");
        assert!(session.character.grounded);
        assert!(!session.jump_pending());
    }

    #[test]
    fn test_pointer_press_release_cycle() {
        let (mut game, mut router) = setup();
        router.handle(&mut game, &RawInput::PointerDown);
        assert!(game.session().expect("run").jump_pending());
        router.handle(&mut game, &RawInput::PointerUp);
        assert!(!game.session().expect("run").jump_pending());
    }

    #[test]
    fn test_router_detaches_after_death() {
        let mut game = Game::new(Tuning::default(), 800.0, 600.0).with_seed(1);
        let mut router = InputRouter::new();
        router.attach(game.start_run());

        // Run many frames with nobody jumping until the run ends
        let mut now = 0.0;
        while game.accepts_input() {
            now += 16.0;
            game.frame(now);
            assert!(now < 1.0e6, "run never ended");
        }

        let resp = router.handle(&mut game, &space_down());
        assert!(!resp.routed);
        assert!(!router.is_attached());
    }
}
