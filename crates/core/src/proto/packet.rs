use endian_codec::{EncodeLE, PackedSize};

use super::{MessageType, PROTOCOL_NUMBER};
use crate::color::Hsbk;

/// Size of the encoded frame header in bytes.
pub const HEADER_LEN: usize = RawHeader::PACKED_LEN;

/// Size of a whole encoded `SetColor` packet in bytes.
pub const PACKET_LEN: usize = HEADER_LEN + RawSetColor::PACKED_LEN;

/// `SetColor` message payload: a target color and the interval over which
/// the device interpolates towards it. A zero duration snaps instantly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetColor {
    pub color: Hsbk,
    pub duration_ms: u32,
}

/// A single outgoing protocol packet.
///
/// Built once per send, encoded and discarded; nothing is ever persisted or
/// decoded back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packet {
    /// Marks the target field as addressing all devices.
    pub tagged: bool,
    /// Arbitrary client identifier, constant for the lifetime of the process.
    pub source: u32,
    /// Device address; zero means broadcast.
    pub target: u64,
    /// Ask the device to acknowledge the message.
    pub ack_required: bool,
    /// Ask the device to respond with its state.
    pub response_required: bool,
    /// Wrap-around message sequence number.
    pub sequence: u8,
    pub payload: SetColor,
}

impl Packet {
    /// Creates a broadcast, fire-and-forget `SetColor` packet.
    #[must_use]
    pub fn set_color(source: u32, sequence: u8, payload: SetColor) -> Self {
        Self {
            tagged: true,
            source,
            target: 0,
            ack_required: false,
            response_required: false,
            sequence,
            payload,
        }
    }

    /// Encodes the packet into `buf` and returns the encoded slice.
    ///
    /// # Panics
    ///
    /// Panics if `buf` is shorter than [`PACKET_LEN`].
    pub fn encode<'a>(&self, buf: &'a mut [u8]) -> &'a [u8] {
        assert!(buf.len() >= PACKET_LEN);

        let header = RawHeader {
            size: PACKET_LEN as u16,
            flags: u16::from(self.tagged) << 13 | 1 << 12 | PROTOCOL_NUMBER,
            source: self.source,
            target: self.target,
            reserved_site: 0,
            reserved_site_tail: 0,
            response_flags: u8::from(self.ack_required) << 1
                | u8::from(self.response_required),
            sequence: self.sequence,
            reserved_timestamp: 0,
            message_type: MessageType::SetColor as u16,
            reserved_tail: 0,
        };
        header.encode_as_le_bytes(&mut buf[..HEADER_LEN]);

        let payload = RawSetColor {
            reserved: 0,
            hue: self.payload.color.hue,
            saturation: self.payload.color.saturation,
            brightness: self.payload.color.brightness,
            kelvin: self.payload.color.kelvin,
            duration_ms: self.payload.duration_ms,
        };
        payload.encode_as_le_bytes(&mut buf[HEADER_LEN..PACKET_LEN]);

        &buf[..PACKET_LEN]
    }
}

/// Wire layout of the 36-byte frame header.
///
/// Everything is little-endian and the reserved fields must stay zero. The
/// six reserved bytes after the target are split into two integer fields
/// because the codec packs plain integers.
#[derive(Debug, Clone, Copy, PackedSize, EncodeLE)]
struct RawHeader {
    /// Size of the entire message in bytes, including this field.
    size: u16,
    /// Origin (zero) | tagged << 13 | addressable (one) << 12 | protocol.
    flags: u16,
    source: u32,
    target: u64,
    reserved_site: u32,
    reserved_site_tail: u16,
    /// ack-required << 1 | response-required.
    response_flags: u8,
    sequence: u8,
    reserved_timestamp: u64,
    message_type: u16,
    reserved_tail: u16,
}

/// Wire layout of the 13-byte `SetColor` payload.
#[derive(Debug, Clone, Copy, PackedSize, EncodeLE)]
struct RawSetColor {
    reserved: u8,
    hue: u16,
    saturation: u16,
    brightness: u16,
    kelvin: u16,
    duration_ms: u32,
}

#[cfg(test)]
mod tests {
    use super::{Packet, SetColor, HEADER_LEN, PACKET_LEN};
    use crate::color::Hsbk;

    fn sample_payload() -> SetColor {
        SetColor {
            color: Hsbk {
                hue: 1000,
                saturation: 5000,
                brightness: 32768,
                kelvin: 3500,
            },
            duration_ms: 250,
        }
    }

    #[test]
    fn layout_constants() {
        assert_eq!(HEADER_LEN, 36);
        assert_eq!(PACKET_LEN, 49);
    }

    #[test]
    fn encoded_set_color_layout() {
        let packet = Packet::set_color(92_985, 7, sample_payload());

        let mut buf = [0_u8; PACKET_LEN];
        let bytes = packet.encode(&mut buf);
        assert_eq!(bytes.len(), PACKET_LEN);

        // Frame header: size, flags (tagged | addressable | protocol 1024),
        // source.
        assert_eq!(u16::from_le_bytes([bytes[0], bytes[1]]), 49);
        assert_eq!(u16::from_le_bytes([bytes[2], bytes[3]]), 0x3000 | 1024);
        assert_eq!(
            u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            92_985
        );

        // Frame address: broadcast target, reserved, flags, sequence.
        assert_eq!(&bytes[8..22], &[0; 14]);
        assert_eq!(bytes[22], 0);
        assert_eq!(bytes[23], 7);

        // Protocol header: reserved, message type, reserved.
        assert_eq!(&bytes[24..32], &[0; 8]);
        assert_eq!(u16::from_le_bytes([bytes[32], bytes[33]]), 102);
        assert_eq!(&bytes[34..36], &[0; 2]);

        // SetColor payload.
        assert_eq!(bytes[36], 0);
        assert_eq!(u16::from_le_bytes([bytes[37], bytes[38]]), 1000);
        assert_eq!(u16::from_le_bytes([bytes[39], bytes[40]]), 5000);
        assert_eq!(u16::from_le_bytes([bytes[41], bytes[42]]), 32768);
        assert_eq!(u16::from_le_bytes([bytes[43], bytes[44]]), 3500);
        assert_eq!(
            u32::from_le_bytes([bytes[45], bytes[46], bytes[47], bytes[48]]),
            250
        );
    }

    #[test]
    fn response_flag_bits() {
        let mut packet = Packet::set_color(1, 0, sample_payload());
        packet.tagged = false;
        packet.ack_required = true;
        packet.response_required = true;

        let mut buf = [0_u8; PACKET_LEN];
        let bytes = packet.encode(&mut buf);
        assert_eq!(u16::from_le_bytes([bytes[2], bytes[3]]), 0x1000 | 1024);
        assert_eq!(bytes[22], 0b11);
    }
}
