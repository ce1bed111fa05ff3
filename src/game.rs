//! Session owner
//!
//! Builds a fresh [`RunState`] per run, hands out the input lease for it,
//! drives one tick per frame and turns a death into exactly one notification
//! plus the timed UI hand-off.

use crate::sim::{FrameSnapshot, PlayArea, RunMode, RunState, ShapeKind, tick};
use crate::tuning::Tuning;
use crate::ui::{Scheduler, Screen, Sequence, SequenceId, UiAction};

/// Capability to feed jump input into one specific run. Revoked when that run
/// leaves Playing or a new run starts.
#[derive(Debug, PartialEq, Eq)]
pub struct InputLease {
    generation: u64,
}

/// Things the host should react to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    RunStarted { seed: u64 },
    Spawned(ShapeKind),
    /// Emitted once per run, on the frame of the collision
    Died { distance: u64, obstacle: ShapeKind },
    /// Dying -> Over
    HandedOff,
    Ui(UiAction),
}

/// Output of one display frame
#[derive(Debug, Clone)]
pub struct Frame {
    /// `None` before the first run
    pub snapshot: Option<FrameSnapshot>,
    pub events: Vec<GameEvent>,
}

pub struct Game {
    tuning: Tuning,
    area: PlayArea,
    pending_area: Option<PlayArea>,
    session: Option<RunState>,
    scheduler: Scheduler,
    death_sequence: Option<SequenceId>,
    /// Generation whose lease is currently honored
    input_owner: Option<u64>,
    generation: u64,
    fixed_seed: Option<u64>,
    pending_events: Vec<GameEvent>,
}

impl Game {
    pub fn new(tuning: Tuning, width: f32, height: f32) -> Self {
        Self {
            tuning,
            area: PlayArea::new(width, height),
            pending_area: None,
            session: None,
            scheduler: Scheduler::new(),
            death_sequence: None,
            input_owner: None,
            generation: 0,
            fixed_seed: None,
            pending_events: Vec::new(),
        }
    }

    /// Every run uses `seed` instead of a fresh random one
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.fixed_seed = Some(seed);
        self
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn session(&self) -> Option<&RunState> {
        self.session.as_ref()
    }

    pub fn mode(&self) -> Option<RunMode> {
        self.session.as_ref().map(RunState::mode)
    }

    /// Whether a lease is currently honored
    pub fn accepts_input(&self) -> bool {
        self.input_owner.is_some()
    }

    /// Death pose hold or death screens still pending
    pub fn death_sequence_running(&self) -> bool {
        self.death_sequence.is_some()
    }

    pub fn snapshot(&self) -> Option<FrameSnapshot> {
        self.session.as_ref().map(RunState::snapshot)
    }

    /// Start a non-run UI sequence (intro, turn back)
    pub fn play_sequence(&mut self, sequence: &Sequence, now_ms: f64) -> SequenceId {
        self.scheduler.start(sequence, now_ms)
    }

    /// Discard any previous run and begin a new one
    pub fn start_run(&mut self) -> InputLease {
        self.scheduler.cancel_all();
        self.death_sequence = None;

        if let Some(area) = self.pending_area.take() {
            self.area = area;
        }

        let seed = self.fixed_seed.unwrap_or_else(rand::random);
        self.session = Some(RunState::new(self.tuning.clone(), self.area, seed));

        self.generation += 1;
        self.input_owner = Some(self.generation);
        self.pending_events.push(GameEvent::RunStarted { seed });
        self.pending_events
            .push(GameEvent::Ui(UiAction::ShowScreen(Screen::Game)));
        log::info!("Run {} started with seed {}", self.generation, seed);

        InputLease {
            generation: self.generation,
        }
    }

    fn owns_input(&self, lease: &InputLease) -> bool {
        self.input_owner == Some(lease.generation)
    }

    /// Jump press from the input layer. Returns true if the character took off.
    pub fn request_jump(&mut self, lease: &InputLease) -> bool {
        if !self.owns_input(lease) {
            log::trace!("Jump from revoked lease {}", lease.generation);
            return false;
        }
        self.session
            .as_mut()
            .is_some_and(RunState::request_jump)
    }

    /// Jump release from the input layer
    pub fn release_jump(&mut self, lease: &InputLease) {
        if !self.owns_input(lease) {
            return;
        }
        if let Some(session) = self.session.as_mut() {
            session.release_jump();
        }
    }

    /// Queue new surface dimensions; applied at the start of the next frame
    pub fn resize(&mut self, width: f32, height: f32) {
        let area = PlayArea::new(width, height);
        if !area.is_valid() {
            log::warn!("Ignoring resize to {}x{}", width, height);
            return;
        }
        self.pending_area = Some(area);
    }

    /// Run one display frame at wall time `now_ms`
    pub fn frame(&mut self, now_ms: f64) -> Frame {
        let mut events = std::mem::take(&mut self.pending_events);

        if let Some(area) = self.pending_area.take() {
            self.area = area;
            if let Some(session) = self.session.as_mut() {
                session.set_area(area);
            }
        }

        if let Some(session) = self.session.as_mut() {
            let report = tick(session);
            if let Some(kind) = report.spawned {
                events.push(GameEvent::Spawned(kind));
            }
            if let Some(hit) = report.death {
                // Revoke before anything else can deliver input
                self.input_owner = None;
                events.push(GameEvent::Died {
                    distance: session.distance,
                    obstacle: hit.kind,
                });
                self.death_sequence = Some(
                    self.scheduler
                        .start(&Sequence::death(&session.tuning.death), now_ms),
                );
            }
        }

        for action in self.scheduler.poll(now_ms) {
            match action {
                UiAction::HandOff => {
                    if self.session.as_mut().is_some_and(RunState::hand_off) {
                        events.push(GameEvent::HandedOff);
                    }
                }
                other => events.push(GameEvent::Ui(other)),
            }
        }

        if self
            .death_sequence
            .is_some_and(|id| !self.scheduler.is_active(id))
        {
            self.death_sequence = None;
        }

        Frame {
            snapshot: self.snapshot(),
            events,
        }
    }
}
