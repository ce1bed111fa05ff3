//! Platform abstraction layer
//!
//! Translates host events (keyboard, pointer) into game calls. Timing and
//! storage stay with the host.

pub mod input;

pub use input::{InputResponse, InputRouter, RawInput};
