//! Modbus function codes
//!
//! Values follow the Modbus Application Protocol specification V1.1b.

use std::fmt;

use crate::error::DecodeError;

/// Operation selector carried in byte 1 of every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum FunctionCode {
    /// Placeholder code 0x00; never a valid operation
    #[default]
    Undefined = 0x00,
    /// FC01: read 1..2000 coils (read/write bits)
    ReadCoils = 0x01,
    /// FC02: read 1..2000 discrete inputs (read-only bits)
    ReadDiscreteInputs = 0x02,
    /// FC03: read 1..125 holding registers (read/write words)
    ReadHoldingRegisters = 0x03,
    /// FC04: read 1..125 input registers (read-only words)
    ReadInputRegister = 0x04,
    /// FC05: write one coil, 0xFF00 = ON, 0x0000 = OFF
    WriteSingleCoil = 0x05,
    /// FC06: write one holding register
    WriteSingleRegister = 0x06,
    /// FC07: read the eight exception status outputs (serial line only)
    SlReadExceptionStatus = 0x07,
    /// FC08: diagnostics (serial line only)
    SlDiagnostics = 0x08,
    /// FC15: write a contiguous run of coils
    WriteMultipleCoils = 0x0F,
    /// FC16: write a contiguous run of holding registers
    WriteMultipleRegisters = 0x10,
}

impl FunctionCode {
    /// Every variant, in wire-value order.
    pub const ALL: [FunctionCode; 11] = [
        Self::Undefined,
        Self::ReadCoils,
        Self::ReadDiscreteInputs,
        Self::ReadHoldingRegisters,
        Self::ReadInputRegister,
        Self::WriteSingleCoil,
        Self::WriteSingleRegister,
        Self::SlReadExceptionStatus,
        Self::SlDiagnostics,
        Self::WriteMultipleCoils,
        Self::WriteMultipleRegisters,
    ];

    /// Raw wire value.
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Human-readable function name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Undefined => "Undefined",
            Self::ReadCoils => "Read Coils",
            Self::ReadDiscreteInputs => "Read Discrete Inputs",
            Self::ReadHoldingRegisters => "Read Holding Registers",
            Self::ReadInputRegister => "Read Input Registers",
            Self::WriteSingleCoil => "Write Single Coil",
            Self::WriteSingleRegister => "Write Single Register",
            Self::SlReadExceptionStatus => "Read Exception Status",
            Self::SlDiagnostics => "Diagnostics",
            Self::WriteMultipleCoils => "Write Multiple Coils",
            Self::WriteMultipleRegisters => "Write Multiple Registers",
        }
    }

    /// FC01/FC02: responses carry packed bits.
    #[inline]
    pub const fn is_bit_read(self) -> bool {
        matches!(self, Self::ReadCoils | Self::ReadDiscreteInputs)
    }

    /// FC03/FC04: responses carry big-endian registers.
    #[inline]
    pub const fn is_register_read(self) -> bool {
        matches!(self, Self::ReadHoldingRegisters | Self::ReadInputRegister)
    }

    #[inline]
    pub const fn is_write(self) -> bool {
        matches!(
            self,
            Self::WriteSingleCoil
                | Self::WriteSingleRegister
                | Self::WriteMultipleCoils
                | Self::WriteMultipleRegisters
        )
    }

    /// Functions only defined for serial line (RTU/ASCII) devices.
    #[inline]
    pub const fn is_serial_line_only(self) -> bool {
        matches!(self, Self::SlReadExceptionStatus | Self::SlDiagnostics)
    }
}

impl TryFrom<u8> for FunctionCode {
    type Error = DecodeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0x00 => Ok(Self::Undefined),
            0x01 => Ok(Self::ReadCoils),
            0x02 => Ok(Self::ReadDiscreteInputs),
            0x03 => Ok(Self::ReadHoldingRegisters),
            0x04 => Ok(Self::ReadInputRegister),
            0x05 => Ok(Self::WriteSingleCoil),
            0x06 => Ok(Self::WriteSingleRegister),
            0x07 => Ok(Self::SlReadExceptionStatus),
            0x08 => Ok(Self::SlDiagnostics),
            0x0F => Ok(Self::WriteMultipleCoils),
            0x10 => Ok(Self::WriteMultipleRegisters),
            _ => Err(DecodeError::UndefinedFunctionCode { code }),
        }
    }
}

impl From<FunctionCode> for u8 {
    fn from(code: FunctionCode) -> Self {
        code.as_u8()
    }
}

impl fmt::Display for FunctionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
