//! Lumicast network layer.
//!
//! Provides the fire-and-forget datagram transport and the per-device
//! [`Light`] endpoint which owns the `SetColor` send pipeline.

// Linter configuration
#![warn(unsafe_code, clippy::pedantic, clippy::use_self)]
// Too many false positives.
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]
// The transport trait is only used inside this workspace; auto-trait
// bounds on the returned futures are not part of its contract.
#![allow(async_fn_in_trait)]

pub use lumicast_core as core;

pub use crate::{
    light::Light,
    transport::{Transport, UdpTransport},
};

mod light;
mod transport;
