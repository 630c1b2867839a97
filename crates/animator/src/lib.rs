//! Lumicast animation scheduler.
//!
//! Owns the timing loop: iterates the frames of a sequence, fans the
//! per-light `SetColor` sends out concurrently and paces playback to the
//! configured frame rate under one of three repeat policies, all of it
//! cancellable between frames.

// Linter configuration
#![warn(unsafe_code, clippy::pedantic, clippy::use_self)]
// Too many false positives.
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

pub use lumicast_core as core;
pub use lumicast_network as network;

pub use crate::{
    cancel::CancelToken,
    events::FrameSink,
    scheduler::{Animation, Outcome, RepeatPolicy},
};

mod cancel;
mod events;
mod scheduler;
