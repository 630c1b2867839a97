//! Per-device endpoint state and the `SetColor` send pipeline.

use std::net::{IpAddr, SocketAddr};

use lumicast_core::{
    color::Hsbk,
    proto::{Packet, SetColor, DEVICE_PORT, PACKET_LEN},
    sequence::Sequence,
    RGB8,
};

use crate::Transport;

/// Client identifier stamped into every outgoing frame header. The value is
/// arbitrary; devices echo it in responses, which this tool never reads.
const SOURCE_ID: u32 = 92_985;

/// One addressable bulb: where it lives, which sequence row drives it and
/// which color was last handed to the transport.
///
/// The last-sent color exists solely to support the anti-flicker rule in
/// [`Self::send_set_color`] and is touched by nothing else; lights therefore
/// need no synchronization between each other.
#[derive(Debug)]
pub struct Light {
    address: SocketAddr,
    row: usize,
    brightness_factor: f32,
    last_sent: Option<Hsbk>,
    sequence_number: u8,
}

impl Light {
    /// Creates an endpoint for a device listening on the standard port,
    /// driven by the given sequence row.
    #[must_use]
    pub fn new(ip: IpAddr, row: usize) -> Self {
        Self {
            address: SocketAddr::new(ip, DEVICE_PORT),
            row,
            brightness_factor: 1.0,
            last_sent: None,
            sequence_number: 0,
        }
    }

    /// Scales every transmitted brightness by the given factor.
    #[must_use]
    pub fn with_brightness_factor(mut self, factor: f32) -> Self {
        self.brightness_factor = factor;
        self
    }

    /// Destination address of this endpoint.
    #[must_use]
    pub fn address(&self) -> SocketAddr {
        self.address
    }

    /// Sequence row assigned to this endpoint.
    #[must_use]
    pub fn row(&self) -> usize {
        self.row
    }

    /// Color last handed to the transport, if any.
    #[must_use]
    pub fn last_sent(&self) -> Option<Hsbk> {
        self.last_sent
    }

    /// Looks up this light's pixel for the given frame.
    pub fn color<S: Sequence>(&self, sequence: &S, frame: usize) -> RGB8 {
        sequence.color_at(frame, self.row)
    }

    /// Builds and transmits the `SetColor` command for the given frame.
    ///
    /// Transport failures are logged and swallowed: a lost datagram is one
    /// missed frame for this light and the next frame is unaffected. The
    /// post-transform color is recorded as last-sent as soon as the bytes
    /// are handed over, since there is no acknowledgement to wait for.
    pub async fn send_set_color<S, T>(
        &mut self,
        transport: &T,
        sequence: &S,
        frame: usize,
        transition_ms: u32,
    ) where
        S: Sequence,
        T: Transport,
    {
        let mut color = Hsbk::from_rgb(self.color(sequence, frame))
            .scale_brightness(self.brightness_factor);

        // A bulb fading to black over a transition interpolates hue and
        // saturation as well; pin them to the previous send so the bulb
        // does not flash an unrelated color on the way down.
        if color.brightness == 0 && transition_ms > 0 {
            if let Some(last) = self.last_sent {
                color.hue = last.hue;
                color.saturation = last.saturation;
            }
        }

        let packet = Packet::set_color(
            SOURCE_ID,
            self.sequence_number,
            SetColor {
                color,
                duration_ms: transition_ms,
            },
        );
        self.sequence_number = self.sequence_number.wrapping_add(1);

        let mut buf = [0_u8; PACKET_LEN];
        let bytes = packet.encode(&mut buf);
        if let Err(err) = transport.send_to(bytes, self.address).await {
            log::debug!("Send to {} failed: {err}", self.address);
        }
        self.last_sent = Some(color);
    }
}
