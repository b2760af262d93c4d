//! # Modbus Interp - Strongly-Typed Modbus Message Decoder
//!
//! **License:** MIT
//!
//! Decodes framed Modbus PDUs (slave address + function code + payload,
//! checksum already validated and stripped) into a [`Message`]: requests,
//! responses and exception replies for every supported function code.
//!
//! ## Features
//!
//! - **Pure**: decoding is a function of its input; no I/O, no shared state
//! - **Memory Safe**: every read is bounds-checked, no unsafe code
//! - **Exhaustive**: one decoder arm per function code, checked by the compiler
//! - **Extensible exceptions**: vendor exception codes decode as `Unknown(raw)`
//! - **Modbus TCP**: MBAP header splitting for TCP ADUs
//!
//! ## Supported Function Codes
//!
//! | Code | Function | Request | Response |
//! |------|----------|---------|----------|
//! | 0x01 | Read Coils | ✅ | ✅ |
//! | 0x02 | Read Discrete Inputs | ✅ | ✅ |
//! | 0x03 | Read Holding Registers | ✅ | ✅ |
//! | 0x04 | Read Input Registers | ✅ | ✅ |
//! | 0x05 | Write Single Coil | ✅ | ✅ |
//! | 0x06 | Write Single Register | ✅ | ✅ |
//! | 0x07 | Read Exception Status | - | ✅ |
//! | 0x08 | Diagnostics | ✅ | ✅ |
//! | 0x0F | Write Multiple Coils | ✅ | ✅ |
//! | 0x10 | Write Multiple Registers | ✅ | ✅ |
//!
//! ## Quick Start
//!
//! ```rust
//! use modbus_interp::{decode, DecodeError, ExceptionCode, FunctionCode};
//!
//! // Read Coils response: 5 coils packed into 0x14
//! let msg = decode(&[0x06, 0x01, 0x05, 0x14]).unwrap();
//! assert_eq!(msg.function_code, FunctionCode::ReadCoils);
//! assert_eq!(msg.values, vec![0, 0, 1, 0, 1]);
//!
//! // Exception response
//! let msg = decode(&[0x06, 0x81, 0x02]).unwrap();
//! assert!(msg.has_error());
//! assert_eq!(msg.error_code, ExceptionCode::IllegalDataAddress);
//!
//! // Malformed input is an error, never a panic
//! assert!(matches!(decode(&[0x06]), Err(DecodeError::TooShort { .. })));
//! ```

#![forbid(unsafe_code)]

// ============================================================================
// Core modules
// ============================================================================

/// Decode error types and result handling
pub mod error;

/// Modbus protocol constants based on official specification
pub mod constants;

/// Function code enumeration
pub mod function;

/// Exception code enumeration
pub mod exception;

/// Decoded message representation
pub mod message;

/// Decoder configuration
pub mod config;

/// Function-code dispatch and payload decoding
pub mod decoder;

/// Modbus TCP (MBAP) framing
pub mod mbap;

// ============================================================================
// Re-exports for convenience
// ============================================================================

// === Decoding ===
pub use decoder::{decode, Decoder};
pub use mbap::{decode_tcp_frame, MbapHeader};

// === Error handling ===
pub use error::{DecodeError, DecodeResult};

// === Core types ===
pub use exception::ExceptionCode;
pub use function::FunctionCode;
pub use message::{Message, Shape};

// === Configuration ===
pub use config::DecoderConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
