//! Lumicast core types.
//!
//! Holds everything that does not touch the wire or the clock: the HSBK
//! color model, the binary packet codec and the animation sequence
//! abstraction.

// Linter configuration
#![warn(unsafe_code, clippy::pedantic, clippy::use_self)]
// Too many false positives.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

pub use errors::{Error, Result};
pub use smart_leds::RGB8;

pub mod color;
pub mod errors;
pub mod proto;
pub mod sequence;
pub mod time;
