//! Edge-triggered jump gate
//!
//! Keyboard and pointer sources collapse into one "jump" intent. A jump fires
//! only from the ground and only once per press; holding the control does not
//! repeat it.

use super::state::Character;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputGate {
    /// Press accepted and not yet released
    pending: bool,
    /// Set once the run leaves Playing; never cleared
    detached: bool,
}

impl InputGate {
    /// Try to take off. Returns true if the character's velocity changed.
    pub fn request_jump(&mut self, character: &mut Character, impulse: f32) -> bool {
        if self.detached || self.pending || !character.grounded {
            return false;
        }
        character.launch(impulse);
        self.pending = true;
        true
    }

    pub fn release_jump(&mut self) {
        self.pending = false;
    }

    /// Stop accepting input for the rest of the run
    pub fn detach(&mut self) {
        self.detached = true;
        self.pending = false;
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        !self.detached
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn grounded() -> Character {
        Character::new(100.0, 600.0, Vec2::new(52.0, 64.0))
    }

    #[test]
    fn test_jump_from_ground() {
        let mut gate = InputGate::default();
        let mut c = grounded();
        assert!(gate.request_jump(&mut c, -13.2));
        assert_eq!(c.vel_y, -13.2);
        assert!(!c.grounded);
        assert!(gate.is_pending());
    }

    #[test]
    fn test_pending_blocks_reentry_even_if_grounded() {
        let mut gate = InputGate::default();
        let mut c = grounded();
        assert!(gate.request_jump(&mut c, -13.2));

        // Something else left the character grounded; the held press still gates
        c.grounded = true;
        c.vel_y = 0.0;
        assert!(!gate.request_jump(&mut c, -13.2));
        assert_eq!(c.vel_y, 0.0);

        gate.release_jump();
        assert!(gate.request_jump(&mut c, -13.2));
    }

    #[test]
    fn test_airborne_press_does_not_latch() {
        let mut gate = InputGate::default();
        let mut c = grounded();
        c.grounded = false;
        assert!(!gate.request_jump(&mut c, -13.2));
        assert!(!gate.is_pending());
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut gate = InputGate::default();
        let mut c = grounded();
        gate.request_jump(&mut c, -13.2);

        let mut once = gate.clone();
        once.release_jump();
        let mut thrice = gate.clone();
        thrice.release_jump();
        thrice.release_jump();
        thrice.release_jump();
        assert_eq!(once, thrice);
    }

    #[test]
    fn test_detached_gate_ignores_requests() {
        let mut gate = InputGate::default();
        let mut c = grounded();
        gate.detach();
        assert!(!gate.is_attached());
        assert!(!gate.request_jump(&mut c, -13.2));
        assert!(c.grounded);
        assert_eq!(c.vel_y, 0.0);
    }
}
