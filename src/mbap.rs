//! Modbus TCP application data unit support
//!
//! A TCP ADU is the 7-byte MBAP header followed by the PDU. The unit id is the
//! last header byte and plays the role of the slave address, so the bytes from
//! the unit id onward are exactly what [`decode`](crate::decode) expects.
//!
//! ```text
//! | transaction id (2) | protocol id (2) | length (2) | unit id (1) | PDU ... |
//! ```

use crate::constants::{MAX_MBAP_LENGTH, MBAP_HEADER_LEN, MBAP_LENGTH_OFFSET};
use crate::decoder::Decoder;
use crate::error::{DecodeError, DecodeResult};
use crate::message::Message;

/// Parsed MBAP header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MbapHeader {
    pub transaction_id: u16,
    /// Always 0 for Modbus
    pub protocol_id: u16,
    /// Byte count of unit id + PDU
    pub length: u16,
    pub unit_id: u8,
}

impl MbapHeader {
    /// Parse and validate the header at the start of `frame`.
    pub fn parse(frame: &[u8]) -> DecodeResult<Self> {
        // header + function code
        let min = MBAP_HEADER_LEN + 1;
        if frame.len() < min {
            return Err(DecodeError::TooShort {
                len: frame.len(),
                min,
            });
        }

        let header = Self {
            transaction_id: u16::from_be_bytes([frame[0], frame[1]]),
            protocol_id: u16::from_be_bytes([frame[2], frame[3]]),
            length: u16::from_be_bytes([frame[4], frame[5]]),
            unit_id: frame[6],
        };

        if header.protocol_id != 0 {
            return Err(DecodeError::invalid_frame(format!(
                "protocol id {} is not Modbus (0)",
                header.protocol_id
            )));
        }
        let length = usize::from(header.length);
        if !(2..=MAX_MBAP_LENGTH).contains(&length) {
            return Err(DecodeError::invalid_frame(format!(
                "length field {} outside 2..={}",
                length, MAX_MBAP_LENGTH
            )));
        }

        Ok(header)
    }

    /// Total ADU size announced by the header.
    #[inline]
    pub fn frame_len(&self) -> usize {
        MBAP_LENGTH_OFFSET + usize::from(self.length)
    }
}

/// Split a TCP ADU into its header and the unit id + PDU bytes.
///
/// Bytes past the announced length are ignored.
pub fn split_tcp_frame(frame: &[u8]) -> DecodeResult<(MbapHeader, &[u8])> {
    let header = MbapHeader::parse(frame)?;
    let end = header.frame_len();
    let body = frame
        .get(MBAP_LENGTH_OFFSET..end)
        .ok_or(DecodeError::TruncatedPayload {
            needed: end,
            actual: frame.len(),
        })?;
    Ok((header, body))
}

/// Decode a Modbus TCP ADU with the default configuration.
pub fn decode_tcp_frame(frame: &[u8]) -> DecodeResult<(MbapHeader, Message)> {
    decode_tcp_frame_with(&Decoder::default(), frame)
}

/// Decode a Modbus TCP ADU with a configured decoder.
pub fn decode_tcp_frame_with(
    decoder: &Decoder,
    frame: &[u8],
) -> DecodeResult<(MbapHeader, Message)> {
    let (header, body) = split_tcp_frame(frame)?;
    let message = decoder.decode(body)?;
    Ok((header, message))
}
