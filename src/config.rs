//! # Decoder Configuration
//!
//! Controls how strictly declared quantities are checked while decoding.
//!
//! ## Modbus Specification Limits
//!
//! - **Read Coils/Discrete Inputs (FC01/02)**: Max 2000 bits per request
//! - **Read Holding/Input Registers (FC03/04)**: Max 125 registers per request
//! - **Write Multiple Coils (FC15)**: Max 1968 coils per request
//! - **Write Multiple Registers (FC16)**: Max 123 registers per request
//!
//! The default configuration is lenient: it only enforces what is needed to
//! read the buffer safely. Strict mode also rejects quantities of zero or above
//! these limits. Some devices support less; the limits can be lowered per
//! decoder.

use crate::constants::{MAX_READ_COILS, MAX_READ_REGISTERS, MAX_WRITE_COILS, MAX_WRITE_REGISTERS};
use crate::error::{DecodeError, DecodeResult};
use crate::function::FunctionCode;

/// Decoder settings.
///
/// # Example
///
/// ```rust
/// use modbus_interp::DecoderConfig;
///
/// // Reject anything a small device could never have sent
/// let config = DecoderConfig::strict()
///     .with_max_read_registers(50)
///     .with_max_read_coils(256);
///
/// assert!(config.strict);
/// assert_eq!(config.max_read_registers, 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Enforce the quantity limits below.
    pub strict: bool,
    /// Maximum coils per read (FC01/02).
    pub max_read_coils: u16,
    /// Maximum registers per read (FC03/04).
    pub max_read_registers: u16,
    /// Maximum coils per write (FC15).
    pub max_write_coils: u16,
    /// Maximum registers per write (FC16).
    pub max_write_registers: u16,
}

impl DecoderConfig {
    /// Lenient configuration with Modbus specification limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Strict configuration with Modbus specification limits.
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    /// Enable or disable quantity checks.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set maximum read coils.
    pub fn with_max_read_coils(mut self, count: u16) -> Self {
        self.max_read_coils = count;
        self
    }

    /// Set maximum read registers.
    pub fn with_max_read_registers(mut self, count: u16) -> Self {
        self.max_read_registers = count;
        self
    }

    /// Set maximum write coils.
    pub fn with_max_write_coils(mut self, count: u16) -> Self {
        self.max_write_coils = count;
        self
    }

    /// Set maximum write registers.
    pub fn with_max_write_registers(mut self, count: u16) -> Self {
        self.max_write_registers = count;
        self
    }

    /// Quantity limit for a function, if it addresses a range.
    pub fn limit_for(&self, function: FunctionCode) -> Option<u16> {
        match function {
            FunctionCode::ReadCoils | FunctionCode::ReadDiscreteInputs => {
                Some(self.max_read_coils)
            }
            FunctionCode::ReadHoldingRegisters | FunctionCode::ReadInputRegister => {
                Some(self.max_read_registers)
            }
            FunctionCode::WriteMultipleCoils => Some(self.max_write_coils),
            FunctionCode::WriteMultipleRegisters => Some(self.max_write_registers),
            FunctionCode::Undefined
            | FunctionCode::WriteSingleCoil
            | FunctionCode::WriteSingleRegister
            | FunctionCode::SlReadExceptionStatus
            | FunctionCode::SlDiagnostics => None,
        }
    }

    /// Check a declared quantity. Always passes when not strict.
    pub fn check_quantity(&self, function: FunctionCode, quantity: u16) -> DecodeResult<()> {
        if !self.strict {
            return Ok(());
        }
        match self.limit_for(function) {
            Some(max) if quantity == 0 || quantity > max => {
                Err(DecodeError::QuantityOutOfRange {
                    function,
                    quantity,
                    max,
                })
            }
            _ => Ok(()),
        }
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            strict: false,
            max_read_coils: MAX_READ_COILS,
            max_read_registers: MAX_READ_REGISTERS,
            max_write_coils: MAX_WRITE_COILS,
            max_write_registers: MAX_WRITE_REGISTERS,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
