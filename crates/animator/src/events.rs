//! Progress notifications emitted by the scheduler.

use std::{net::SocketAddr, time::Duration};

use lumicast_core::RGB8;

/// Receives progress events while an animation runs.
///
/// Events are purely informational, intended for a console or similar
/// display layer; the scheduler's correctness never depends on them being
/// consumed, and every method defaults to a no-op.
pub trait FrameSink {
    /// A frame is about to be rendered. `frame` counts from 1 to `total`
    /// within the current cycle.
    fn frame_started(&mut self, frame: usize, total: usize, cycle: u32) {
        let _ = (frame, total, cycle);
    }

    /// The given color is about to be sent to the light at `address`.
    fn light_color(&mut self, address: SocketAddr, color: RGB8) {
        let _ = (address, color);
    }

    /// Every send for the current frame has been handed to the transport.
    ///
    /// `remaining_cycles` is `None` under the unbounded repeat policies.
    fn frame_rendered(&mut self, elapsed: Duration, remaining_cycles: Option<u32>) {
        let _ = (elapsed, remaining_cycles);
    }
}

/// Discards all events.
impl FrameSink for () {}
