//! Decoded Modbus message
//!
//! A [`Message`] owns every field it exposes; nothing in it borrows from the
//! buffer it was decoded from.

use std::fmt;

use crate::exception::ExceptionCode;
use crate::function::FunctionCode;

/// Which side of the exchange a frame was recognized as.
///
/// The wire format carries no explicit request/response flag, so the shape is
/// inferred from the function code and the buffer length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    /// Client to server
    Request,
    /// Server to client
    Response,
    /// Request and response share one layout (FC05, FC06, FC08)
    Echo,
    /// Exception response; the function byte had its high bit set
    Exception,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Request => "request",
            Self::Response => "response",
            Self::Echo => "echo",
            Self::Exception => "exception",
        };
        f.write_str(s)
    }
}

/// The result of decoding one framed PDU.
///
/// Fields that do not apply to the decoded shape are `None` (or empty for
/// `values`). For bit-oriented payloads every entry of `values` is 0 or 1.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    /// Addressed device (byte 0)
    pub slave_address: u8,
    /// Function code with the exception flag removed
    pub function_code: FunctionCode,
    /// Request, response, echo or exception, inferred while decoding
    pub shape: Shape,
    /// `NoError` unless `shape` is [`Shape::Exception`]
    pub error_code: ExceptionCode,
    /// First coil/register address (or the single written address)
    pub starting_address: Option<u16>,
    /// Number of coils/registers addressed
    pub quantity: Option<u16>,
    /// Number of packed payload bytes. Read from the wire for FC03/04
    /// responses and FC15/16 requests; for FC01/02 responses, where byte 2
    /// carries the coil count, it is derived as `ceil(quantity / 8)`
    pub byte_count: Option<u8>,
    /// FC08 sub-function
    pub sub_function: Option<u16>,
    /// Decoded coils (0/1) or registers, in ascending address order
    pub values: Vec<u16>,
}

impl Message {
    /// Create a message with only the envelope populated.
    pub fn new(slave_address: u8, function_code: FunctionCode, shape: Shape) -> Self {
        Self {
            slave_address,
            function_code,
            shape,
            error_code: ExceptionCode::NoError,
            starting_address: None,
            quantity: None,
            byte_count: None,
            sub_function: None,
            values: Vec::new(),
        }
    }

    /// Create an exception response.
    pub fn exception(
        slave_address: u8,
        function_code: FunctionCode,
        error_code: ExceptionCode,
    ) -> Self {
        Self {
            error_code,
            ..Self::new(slave_address, function_code, Shape::Exception)
        }
    }

    /// True iff the raw function byte had the exception flag set.
    #[inline]
    pub fn has_error(&self) -> bool {
        self.shape == Shape::Exception
    }

    #[inline]
    pub fn is_request(&self) -> bool {
        self.shape == Shape::Request
    }

    #[inline]
    pub fn is_response(&self) -> bool {
        self.shape == Shape::Response
    }

    /// Values as booleans, for coil and discrete input payloads.
    pub fn coils(&self) -> impl Iterator<Item = bool> + '_ {
        self.values.iter().map(|&v| v != 0)
    }

    /// Raw function byte as it appeared on the wire.
    pub fn raw_function_byte(&self) -> u8 {
        if self.has_error() {
            self.function_code.as_u8() | crate::constants::EXCEPTION_FLAG
        } else {
            self.function_code.as_u8()
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "slave={} fc=0x{:02X} ({}) {}",
            self.slave_address,
            self.function_code.as_u8(),
            self.function_code,
            self.shape
        )?;

        if self.has_error() {
            return write!(f, ": {}", self.error_code);
        }
        if let Some(sub) = self.sub_function {
            write!(f, " sub_function=0x{:04X}", sub)?;
        }
        if let Some(addr) = self.starting_address {
            write!(f, " address={}", addr)?;
        }
        if let Some(qty) = self.quantity {
            write!(f, " quantity={}", qty)?;
        }
        if let Some(count) = self.byte_count {
            write!(f, " byte_count={}", count)?;
        }
        if !self.values.is_empty() {
            write!(f, " values={:?}", self.values)?;
        }
        Ok(())
    }
}
