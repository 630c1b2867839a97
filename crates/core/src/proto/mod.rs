//! LIFX LAN wire protocol, reduced to the single message this tool needs.
//!
//! The protocol is used strictly fire-and-forget: packets are encoded and
//! transmitted, device responses are never read, so there is no decoder.

pub use self::packet::{Packet, SetColor, HEADER_LEN, PACKET_LEN};

mod packet;

/// UDP port the devices listen on.
pub const DEVICE_PORT: u16 = 56700;

/// Protocol number carried in the flags word of every frame header.
pub(crate) const PROTOCOL_NUMBER: u16 = 1024;

/// Message type codes understood by this crate.
///
/// Every message type has one static payload shape, so adding one means
/// adding another fixed-size payload encoder next to [`SetColor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum MessageType {
    /// Set the device color over an optional transition interval.
    SetColor = 102,
}
