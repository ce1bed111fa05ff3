//! Cancellable (delay, action) sequences driven by a single scheduler

use super::{Screen, TextId, UiAction};
use crate::tuning::DeathTiming;

/// One step, `at_ms` after the sequence starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub at_ms: f64,
    pub action: UiAction,
}

/// Ordered list of timed actions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sequence {
    steps: Vec<Step>,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(mut self, at_ms: f64, action: UiAction) -> Self {
        self.steps.push(Step { at_ms, action });
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Hold the death pose, hand off, then fade the death text and return to
    /// the menu
    pub fn death(timing: &DeathTiming) -> Self {
        let hold = timing.hold_ms;
        Self::new()
            .at(hold, UiAction::HandOff)
            .at(hold, UiAction::ShowScreen(Screen::Death))
            .at(
                hold + timing.text_in_ms,
                UiAction::SetText {
                    text: TextId::Death,
                    visible: true,
                },
            )
            .at(
                hold + timing.text_out_ms,
                UiAction::SetText {
                    text: TextId::Death,
                    visible: false,
                },
            )
            .at(hold + timing.menu_ms, UiAction::ShowScreen(Screen::Menu))
    }

    /// Title card on launch
    pub fn intro() -> Self {
        Self::new()
            .at(0.0, UiAction::ShowScreen(Screen::Intro))
            .at(
                600.0,
                UiAction::SetText {
                    text: TextId::Intro,
                    visible: true,
                },
            )
            .at(
                3800.0,
                UiAction::SetText {
                    text: TextId::Intro,
                    visible: false,
                },
            )
            .at(5400.0, UiAction::ShowScreen(Screen::Menu))
    }

    /// "Turn back" menu choice
    pub fn turn_back() -> Self {
        Self::new()
            .at(0.0, UiAction::ShowScreen(Screen::TurnBack))
            .at(
                300.0,
                UiAction::SetText {
                    text: TextId::TurnBack,
                    visible: true,
                },
            )
            .at(
                3200.0,
                UiAction::SetText {
                    text: TextId::TurnBack,
                    visible: false,
                },
            )
            .at(5000.0, UiAction::ShowScreen(Screen::Menu))
    }

    /// "Do nothing" menu choice; the host returns to the menu on regret
    pub fn do_nothing() -> Self {
        Self::new()
            .at(0.0, UiAction::ShowScreen(Screen::DoNothing))
            .at(4200.0, UiAction::RevealRegret)
    }
}

/// Handle to a started sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SequenceId(u64);

#[derive(Debug, Clone)]
struct Pending {
    sequence: SequenceId,
    due_ms: f64,
    /// Position within its sequence, for stable ordering of equal deadlines
    order: usize,
    action: UiAction,
}

/// Owns every pending timed action
#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    pending: Vec<Pending>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule all steps of `sequence` relative to `now_ms`
    pub fn start(&mut self, sequence: &Sequence, now_ms: f64) -> SequenceId {
        let id = SequenceId(self.next_id);
        self.next_id += 1;
        self.pending
            .extend(sequence.steps.iter().enumerate().map(|(order, step)| Pending {
                sequence: id,
                due_ms: now_ms + step.at_ms,
                order,
                action: step.action,
            }));
        id
    }

    /// Drop the remaining steps of one sequence. Returns how many were dropped.
    pub fn cancel(&mut self, id: SequenceId) -> usize {
        let before = self.pending.len();
        self.pending.retain(|p| p.sequence != id);
        before - self.pending.len()
    }

    pub fn cancel_all(&mut self) {
        if !self.pending.is_empty() {
            log::debug!("Cancelling {} pending UI steps", self.pending.len());
        }
        self.pending.clear();
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Whether any step of `id` is still waiting
    pub fn is_active(&self, id: SequenceId) -> bool {
        self.pending.iter().any(|p| p.sequence == id)
    }

    /// Remove and return every action due at `now_ms`, earliest first
    pub fn poll(&mut self, now_ms: f64) -> Vec<UiAction> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due_ms <= now_ms);
        self.pending = rest;

        due.sort_by(|a, b| {
            a.due_ms
                .total_cmp(&b.due_ms)
                .then(a.sequence.0.cmp(&b.sequence.0))
                .then(a.order.cmp(&b.order))
        });
        due.into_iter().map(|p| p.action).collect()
    }
}
