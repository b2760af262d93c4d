//! Modbus exception codes
//!
//! Exception codes are extensible by vendors, so any byte outside the
//! standard table is kept as [`ExceptionCode::Unknown`] instead of failing.

use std::fmt;

/// Reason code returned in place of a payload when a request fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExceptionCode {
    /// Sentinel for messages that are not exception responses
    #[default]
    NoError,
    /// 0x01: function code not supported by the server
    IllegalFunction,
    /// 0x02: address range not valid on the server
    IllegalDataAddress,
    /// 0x03: a value in the query data field is not allowed
    IllegalDataValue,
    /// 0x04: unrecoverable error while performing the action
    SlaveDeviceFailure,
    /// 0x05: accepted, long-running; poll for completion
    Acknowledge,
    /// 0x06: busy with a long-running command; retry later
    SlaveDeviceBusy,
    /// 0x08: memory parity error in the extended file area
    MemoryPartitionError,
    /// 0x0A: gateway could not allocate a path
    GatewayPathUnavailable,
    /// 0x0B: gateway got no response from the target device
    GatewayTargetDeviceFailedToRespond,
    /// Any code outside the standard table, raw byte preserved
    Unknown(u8),
}

impl ExceptionCode {
    /// Map a raw byte, including 0x00 to [`ExceptionCode::NoError`].
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0x00 => Self::NoError,
            0x01 => Self::IllegalFunction,
            0x02 => Self::IllegalDataAddress,
            0x03 => Self::IllegalDataValue,
            0x04 => Self::SlaveDeviceFailure,
            0x05 => Self::Acknowledge,
            0x06 => Self::SlaveDeviceBusy,
            0x08 => Self::MemoryPartitionError,
            0x0A => Self::GatewayPathUnavailable,
            0x0B => Self::GatewayTargetDeviceFailedToRespond,
            other => Self::Unknown(other),
        }
    }

    /// Map the byte that follows an exception function code.
    ///
    /// A server cannot report "no error" as an exception, so 0x00 here is
    /// kept as `Unknown(0x00)`.
    pub const fn from_exception_byte(value: u8) -> Self {
        match value {
            0x00 => Self::Unknown(0x00),
            other => Self::from_u8(other),
        }
    }

    pub const fn as_u8(self) -> u8 {
        match self {
            Self::NoError => 0x00,
            Self::IllegalFunction => 0x01,
            Self::IllegalDataAddress => 0x02,
            Self::IllegalDataValue => 0x03,
            Self::SlaveDeviceFailure => 0x04,
            Self::Acknowledge => 0x05,
            Self::SlaveDeviceBusy => 0x06,
            Self::MemoryPartitionError => 0x08,
            Self::GatewayPathUnavailable => 0x0A,
            Self::GatewayTargetDeviceFailedToRespond => 0x0B,
            Self::Unknown(raw) => raw,
        }
    }

    /// True for codes outside the standard table.
    #[inline]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown(_))
    }

    /// Short description of the exception
    pub const fn description(self) -> &'static str {
        match self {
            Self::NoError => "No error",
            Self::IllegalFunction => "Illegal function",
            Self::IllegalDataAddress => "Illegal data address",
            Self::IllegalDataValue => "Illegal data value",
            Self::SlaveDeviceFailure => "Slave device failure",
            Self::Acknowledge => "Acknowledge",
            Self::SlaveDeviceBusy => "Slave device busy",
            Self::MemoryPartitionError => "Memory parity error",
            Self::GatewayPathUnavailable => "Gateway path unavailable",
            Self::GatewayTargetDeviceFailedToRespond => "Gateway target device failed to respond",
            Self::Unknown(_) => "Unknown exception code",
        }
    }
}

impl From<u8> for ExceptionCode {
    fn from(value: u8) -> Self {
        Self::from_u8(value)
    }
}

impl From<ExceptionCode> for u8 {
    fn from(code: ExceptionCode) -> Self {
        code.as_u8()
    }
}

impl fmt::Display for ExceptionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:02X})", self.description(), self.as_u8())
    }
}
