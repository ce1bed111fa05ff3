//! Screens and timed UI sequences
//!
//! The engine never touches screens directly. It asks for a [`Sequence`] to be
//! started and the host applies the [`UiAction`]s as they come due.

pub mod sequence;

pub use sequence::{Scheduler, Sequence, SequenceId, Step};

use serde::{Deserialize, Serialize};

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Intro,
    Menu,
    TurnBack,
    DoNothing,
    Game,
    Death,
}

/// Fading text blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextId {
    Intro,
    TurnBack,
    Death,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiAction {
    /// The frozen death pose has been held long enough; UI owns the flow now
    HandOff,
    ShowScreen(Screen),
    SetText { text: TextId, visible: bool },
    /// Reveal the way back to the menu from the idle screen
    RevealRegret,
}
