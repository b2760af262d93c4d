//! # Modbus Message Decoder
//!
//! Turns one framed Modbus PDU (slave address + function code + payload, no
//! checksum) into a [`Message`].
//!
//! ## Frame Layout
//!
//! | Offset | Field |
//! |--------|-------|
//! | 0 | slave address |
//! | 1 | function code, high bit set on exception responses |
//! | 2.. | exception code, or function-specific payload |
//!
//! Requests and responses of the read functions (FC01-04) share their leading
//! bytes, so the shape is inferred from the buffer length: exactly six bytes is
//! a request, anything else a response. A response that happens to be six
//! bytes long is therefore read as a request.
//!
//! Decoding is a pure function of the input. Every read is bounds-checked and
//! a declared length that runs past the buffer fails with
//! [`DecodeError::TruncatedPayload`].

use crate::config::DecoderConfig;
use crate::constants::{
    ADDRESSED_FRAME_LEN, COIL_OFF, COIL_ON, EXCEPTION_FLAG, FUNCTION_CODE_MASK, FUNCTION_CODE_OFFSET,
    MIN_FRAME_LEN, PAYLOAD_OFFSET, SLAVE_ADDRESS_OFFSET, WRITE_BYTE_COUNT_OFFSET,
};
use crate::error::{DecodeError, DecodeResult};
use crate::exception::ExceptionCode;
use crate::function::FunctionCode;
use crate::message::{Message, Shape};

/// Decode one framed PDU with the default (lenient) configuration.
///
/// # Example
///
/// ```rust
/// use modbus_interp::{decode, FunctionCode};
///
/// let msg = decode(&[0x06, 0x01, 0x05, 0x14]).unwrap();
/// assert_eq!(msg.slave_address, 0x06);
/// assert_eq!(msg.function_code, FunctionCode::ReadCoils);
/// assert_eq!(msg.quantity, Some(5));
/// assert_eq!(msg.values, vec![0, 0, 1, 0, 1]);
/// ```
pub fn decode(buffer: &[u8]) -> DecodeResult<Message> {
    Decoder::default().decode(buffer)
}

/// A configured decoder.
///
/// Holds only its [`DecoderConfig`]; it is `Copy` and can be shared freely
/// across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// Decoder that enforces the Modbus quantity limits.
    pub fn strict() -> Self {
        Self::new(DecoderConfig::strict())
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode one framed PDU.
    pub fn decode(&self, buffer: &[u8]) -> DecodeResult<Message> {
        if buffer.len() < MIN_FRAME_LEN {
            return Err(DecodeError::TooShort {
                len: buffer.len(),
                min: MIN_FRAME_LEN,
            });
        }

        let frame = Frame::new(buffer);
        let slave = frame.u8_at(SLAVE_ADDRESS_OFFSET)?;
        let raw_fn = frame.u8_at(FUNCTION_CODE_OFFSET)?;

        if raw_fn & EXCEPTION_FLAG != 0 {
            let function = FunctionCode::try_from(raw_fn & FUNCTION_CODE_MASK)?;
            let code = ExceptionCode::from_exception_byte(frame.u8_at(PAYLOAD_OFFSET)?);
            return Ok(Message::exception(slave, function, code));
        }

        let function = FunctionCode::try_from(raw_fn)?;
        match function {
            FunctionCode::Undefined => Err(DecodeError::UndefinedFunctionCode { code: raw_fn }),
            FunctionCode::ReadCoils | FunctionCode::ReadDiscreteInputs => {
                if frame.len() == ADDRESSED_FRAME_LEN {
                    self.decode_range(slave, function, Shape::Request, &frame)
                } else {
                    self.decode_bit_response(slave, function, &frame)
                }
            }
            FunctionCode::ReadHoldingRegisters | FunctionCode::ReadInputRegister => {
                if frame.len() == ADDRESSED_FRAME_LEN {
                    self.decode_range(slave, function, Shape::Request, &frame)
                } else {
                    self.decode_register_response(slave, function, &frame)
                }
            }
            FunctionCode::WriteSingleCoil => decode_write_single_coil(slave, &frame),
            FunctionCode::WriteSingleRegister => decode_write_single_register(slave, &frame),
            FunctionCode::SlReadExceptionStatus => decode_exception_status(slave, &frame),
            FunctionCode::SlDiagnostics => decode_diagnostics(slave, &frame),
            FunctionCode::WriteMultipleCoils | FunctionCode::WriteMultipleRegisters => {
                if frame.len() == ADDRESSED_FRAME_LEN {
                    self.decode_range(slave, function, Shape::Response, &frame)
                } else {
                    self.decode_write_multiple_request(slave, function, &frame)
                }
            }
        }
    }

    /// Starting address + quantity: read requests and write-multiple echoes.
    fn decode_range(
        &self,
        slave: u8,
        function: FunctionCode,
        shape: Shape,
        frame: &Frame<'_>,
    ) -> DecodeResult<Message> {
        let starting_address = frame.be_u16_at(2)?;
        let quantity = frame.be_u16_at(4)?;
        self.config.check_quantity(function, quantity)?;

        let mut msg = Message::new(slave, function, shape);
        msg.starting_address = Some(starting_address);
        msg.quantity = Some(quantity);
        Ok(msg)
    }

    /// FC01/02 response: byte 2 is the coil count, followed by packed bits.
    fn decode_bit_response(
        &self,
        slave: u8,
        function: FunctionCode,
        frame: &Frame<'_>,
    ) -> DecodeResult<Message> {
        let quantity = u16::from(frame.u8_at(PAYLOAD_OFFSET)?);
        self.config.check_quantity(function, quantity)?;

        let packed_len = packed_len(quantity);
        let packed = frame.bytes(PAYLOAD_OFFSET + 1, packed_len)?;

        let mut msg = Message::new(slave, function, Shape::Response);
        msg.quantity = Some(quantity);
        // quantity <= 255 here, so at most 32 packed bytes
        msg.byte_count = Some(packed_len as u8);
        msg.values = unpack_bits(packed, quantity);
        Ok(msg)
    }

    /// FC03/04 response: byte count followed by big-endian registers.
    fn decode_register_response(
        &self,
        slave: u8,
        function: FunctionCode,
        frame: &Frame<'_>,
    ) -> DecodeResult<Message> {
        let byte_count = frame.u8_at(PAYLOAD_OFFSET)?;
        let data = frame.bytes(PAYLOAD_OFFSET + 1, usize::from(byte_count))?;
        self.config
            .check_quantity(function, u16::from(byte_count) / 2)?;

        let mut msg = Message::new(slave, function, Shape::Response);
        msg.byte_count = Some(byte_count);
        msg.values = unpack_registers(data)?;
        Ok(msg)
    }

    /// FC15/16 request: range, byte count, then packed coils or registers.
    fn decode_write_multiple_request(
        &self,
        slave: u8,
        function: FunctionCode,
        frame: &Frame<'_>,
    ) -> DecodeResult<Message> {
        let starting_address = frame.be_u16_at(2)?;
        let quantity = frame.be_u16_at(4)?;
        let byte_count = frame.u8_at(WRITE_BYTE_COUNT_OFFSET)?;
        self.config.check_quantity(function, quantity)?;

        let required = match function {
            FunctionCode::WriteMultipleCoils => packed_len(quantity),
            _ => usize::from(quantity) * 2,
        };
        if usize::from(byte_count) < required {
            return Err(DecodeError::TruncatedPayload {
                needed: required,
                actual: usize::from(byte_count),
            });
        }
        let data = frame.bytes(WRITE_BYTE_COUNT_OFFSET + 1, usize::from(byte_count))?;
        let data = &data[..required];

        let mut msg = Message::new(slave, function, Shape::Request);
        msg.starting_address = Some(starting_address);
        msg.quantity = Some(quantity);
        msg.byte_count = Some(byte_count);
        msg.values = match function {
            FunctionCode::WriteMultipleCoils => unpack_bits(data, quantity),
            _ => unpack_registers(data)?,
        };
        Ok(msg)
    }
}

/// FC05: address + 0xFF00/0x0000; request and response are identical.
///
/// Any other value word is rejected rather than folded into OFF.
fn decode_write_single_coil(slave: u8, frame: &Frame<'_>) -> DecodeResult<Message> {
    let address = frame.be_u16_at(2)?;
    let state = match frame.be_u16_at(4)? {
        COIL_ON => 1,
        COIL_OFF => 0,
        value => return Err(DecodeError::InvalidCoilValue { value }),
    };

    let mut msg = Message::new(slave, FunctionCode::WriteSingleCoil, Shape::Echo);
    msg.starting_address = Some(address);
    msg.values = vec![state];
    Ok(msg)
}

/// FC06: address + register value; request and response are identical.
fn decode_write_single_register(slave: u8, frame: &Frame<'_>) -> DecodeResult<Message> {
    let address = frame.be_u16_at(2)?;
    let value = frame.be_u16_at(4)?;

    let mut msg = Message::new(slave, FunctionCode::WriteSingleRegister, Shape::Echo);
    msg.starting_address = Some(address);
    msg.values = vec![value];
    Ok(msg)
}

/// FC07 response: one byte of exception status outputs.
///
/// The request has no payload and is below the minimum frame size.
fn decode_exception_status(slave: u8, frame: &Frame<'_>) -> DecodeResult<Message> {
    let status = frame.u8_at(PAYLOAD_OFFSET)?;

    let mut msg = Message::new(slave, FunctionCode::SlReadExceptionStatus, Shape::Response);
    msg.values = vec![u16::from(status)];
    Ok(msg)
}

/// FC08: sub-function followed by data words, echoed by the server.
fn decode_diagnostics(slave: u8, frame: &Frame<'_>) -> DecodeResult<Message> {
    let sub_function = frame.be_u16_at(2)?;
    let data = frame.rest(4);

    let mut msg = Message::new(slave, FunctionCode::SlDiagnostics, Shape::Echo);
    msg.sub_function = Some(sub_function);
    msg.values = unpack_registers(data)?;
    Ok(msg)
}

/// Bytes needed to pack `quantity` bits.
#[inline]
pub fn packed_len(quantity: u16) -> usize {
    usize::from(quantity).div_ceil(8)
}

/// Unpack `quantity` bits, least significant bit of each byte first.
///
/// Stops early if `packed` holds fewer than `quantity` bits; callers check the
/// length beforehand.
pub fn unpack_bits(packed: &[u8], quantity: u16) -> Vec<u16> {
    packed
        .iter()
        .flat_map(|&byte| (0..8).map(move |bit| u16::from((byte >> bit) & 0x01)))
        .take(usize::from(quantity))
        .collect()
}

/// Read big-endian 16-bit registers two bytes at a time.
///
/// An odd length means the last register is incomplete.
pub fn unpack_registers(data: &[u8]) -> DecodeResult<Vec<u16>> {
    if data.len() % 2 != 0 {
        return Err(DecodeError::TruncatedPayload {
            needed: data.len() + 1,
            actual: data.len(),
        });
    }
    Ok(data
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect())
}

/// Bounds-checked view over the input buffer.
struct Frame<'a> {
    buf: &'a [u8],
}

impl<'a> Frame<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    fn len(&self) -> usize {
        self.buf.len()
    }

    fn truncated(&self, needed: usize) -> DecodeError {
        DecodeError::TruncatedPayload {
            needed,
            actual: self.buf.len(),
        }
    }

    fn u8_at(&self, offset: usize) -> DecodeResult<u8> {
        self.buf
            .get(offset)
            .copied()
            .ok_or_else(|| self.truncated(offset + 1))
    }

    fn be_u16_at(&self, offset: usize) -> DecodeResult<u16> {
        let bytes = self.bytes(offset, 2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    fn bytes(&self, offset: usize, len: usize) -> DecodeResult<&'a [u8]> {
        let end = offset + len;
        self.buf
            .get(offset..end)
            .ok_or_else(|| self.truncated(end))
    }

    fn rest(&self, offset: usize) -> &'a [u8] {
        self.buf.get(offset..).unwrap_or(&[])
    }
}

// ============================================================================
// Tests
// ============================================================================
