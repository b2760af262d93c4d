//! Error types for Modbus message decoding
//!
//! Every failure is returned to the caller as a typed [`DecodeError`]. The
//! decoder never panics on malformed input and never retries; whether a
//! failure is a framing fault or a protocol violation is left for the
//! transport layer to act on.

use thiserror::Error;

use crate::function::FunctionCode;

/// Result alias used throughout the crate.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors produced while decoding a framed Modbus message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Buffer is below the minimum frame size.
    #[error("Frame too short: {len} bytes (minimum {min})")]
    TooShort { len: usize, min: usize },

    /// Function code (after removing the exception flag) is not recognized.
    #[error("Undefined function code: 0x{code:02X}")]
    UndefinedFunctionCode { code: u8 },

    /// Declared byte count or quantity implies more bytes than are present.
    #[error("Truncated payload: need {needed} bytes, got {actual}")]
    TruncatedPayload { needed: usize, actual: usize },

    /// Quantity outside the configured limits (strict decoding only).
    #[error("Quantity out of range for {function}: {quantity} (allowed 1..={max})")]
    QuantityOutOfRange {
        function: FunctionCode,
        quantity: u16,
        max: u16,
    },

    /// Write Single Coil value other than 0xFF00 (ON) or 0x0000 (OFF).
    #[error("Invalid coil value: 0x{value:04X} (expected 0xFF00 or 0x0000)")]
    InvalidCoilValue { value: u16 },

    /// Malformed Modbus TCP (MBAP) header.
    #[error("Invalid frame: {message}")]
    InvalidFrame { message: String },
}

impl DecodeError {
    /// Create an invalid frame error.
    pub fn invalid_frame<S: Into<String>>(message: S) -> Self {
        Self::InvalidFrame {
            message: message.into(),
        }
    }

    /// True when the buffer itself is malformed (size or framing).
    ///
    /// Callers should treat these as transport faults rather than retrying the
    /// decode.
    pub fn is_framing_fault(&self) -> bool {
        matches!(
            self,
            Self::TooShort { .. } | Self::TruncatedPayload { .. } | Self::InvalidFrame { .. }
        )
    }

    /// True when the frame is well-sized but violates the protocol.
    pub fn is_protocol_violation(&self) -> bool {
        !self.is_framing_fault()
    }
}
