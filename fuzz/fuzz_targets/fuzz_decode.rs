#![no_main]

use libfuzzer_sys::fuzz_target;
use modbus_interp::{decode, decode_tcp_frame, Decoder};

fuzz_target!(|data: &[u8]| {
    let lenient = decode(data);
    let strict = Decoder::strict().decode(data);

    // Strict decoding only ever rejects more
    if strict.is_ok() {
        assert_eq!(strict, lenient);
    }

    if let Ok(msg) = lenient {
        if msg.has_error() {
            assert!(msg.values.is_empty());
        }
        if msg.function_code.is_bit_read() && msg.is_response() {
            assert_eq!(Some(msg.values.len() as u16), msg.quantity);
        }
    }

    let _ = decode_tcp_frame(data);
});
