//! Modbus protocol constants used by the decoder
//!
//! Frame offsets are relative to the start of the decoded buffer, where byte 0
//! is the slave address and byte 1 the function code. Quantity limits come from
//! the Modbus Application Protocol specification:
//! - Maximum PDU size: 253 bytes (inherited from RS485 ADU limit of 256 bytes)
//! - Register/coil limits are calculated to fit within the PDU size constraint

// ============================================================================
// Frame Layout
// ============================================================================

/// Minimum decodable frame: slave address + function code + one payload byte
pub const MIN_FRAME_LEN: usize = 3;

/// Length of an addressed read request (and of write-multiple echoes):
/// address(1) + function(1) + starting address(2) + quantity(2)
pub const ADDRESSED_FRAME_LEN: usize = 6;

/// High bit of the function byte marking an exception response
pub const EXCEPTION_FLAG: u8 = 0x80;

/// Mask recovering the function code from an exception function byte
pub const FUNCTION_CODE_MASK: u8 = 0x7F;

/// Offset of the slave address
pub const SLAVE_ADDRESS_OFFSET: usize = 0;

/// Offset of the function code byte
pub const FUNCTION_CODE_OFFSET: usize = 1;

/// Offset of the first payload byte (exception code, byte count, address high)
pub const PAYLOAD_OFFSET: usize = 2;

/// Offset of the byte count in write-multiple requests
pub const WRITE_BYTE_COUNT_OFFSET: usize = 6;

/// Coil value meaning ON in a Write Single Coil frame
pub const COIL_ON: u16 = 0xFF00;

/// Coil value meaning OFF in a Write Single Coil frame
pub const COIL_OFF: u16 = 0x0000;

// ============================================================================
// Modbus TCP (MBAP)
// ============================================================================

/// MBAP header length for TCP
/// Format: Transaction ID(2) + Protocol ID(2) + Length(2) + Unit ID(1) = 7 bytes
pub const MBAP_HEADER_LEN: usize = 7;

/// Bytes preceding the MBAP length field's coverage (transaction, protocol, length)
pub const MBAP_LENGTH_OFFSET: usize = 6;

/// Maximum PDU (Protocol Data Unit) size per Modbus specification
/// RS485 ADU (256 bytes) - Slave Address (1 byte) - CRC (2 bytes) = 253 bytes
pub const MAX_PDU_SIZE: usize = 253;

/// Maximum MBAP length field value (Unit ID + PDU)
/// = 1 (Unit ID) + 253 (Max PDU) = 254 bytes
pub const MAX_MBAP_LENGTH: usize = 1 + MAX_PDU_SIZE;

// ============================================================================
// Quantity Limits
// ============================================================================

/// Maximum number of registers for FC03/FC04 (Read Holding/Input Registers)
///
/// Response PDU: 1 (FC) + 1 (byte count) + N × 2 ≤ 253 → N ≤ 125
pub const MAX_READ_REGISTERS: u16 = 125;

/// Maximum number of registers for FC16 (Write Multiple Registers)
///
/// Request PDU: 1 + 2 + 2 + 1 + N × 2 ≤ 253 → N ≤ 123
pub const MAX_WRITE_REGISTERS: u16 = 123;

/// Maximum number of coils for FC01/FC02 (Read Coils/Discrete Inputs)
pub const MAX_READ_COILS: u16 = 2000;

/// Maximum number of coils for FC15 (Write Multiple Coils)
pub const MAX_WRITE_COILS: u16 = 1968;
