//! Modbus Interp Demo
//!
//! Decodes hex-encoded frames given on the command line, or a built-in set of
//! sample frames when none are given.
//!
//! Usage: cargo run --features demo --bin demo -- [--tcp] [--strict] [hex frames...]
//! Example: cargo run --features demo --bin demo -- "06 01 05 14" 068102
//!
//! Log level is taken from `RUST_LOG` (default `info`).

use modbus_interp::mbap::decode_tcp_frame_with;
use modbus_interp::{Decoder, DecoderConfig};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Sample RTU frames (checksum stripped) covering each function code.
const SAMPLES: &[(&str, &str)] = &[
    ("FC01 response", "06 01 05 14"),
    ("FC01 request", "11 01 00 13 00 25"),
    ("FC02 response", "11 02 03 06"),
    ("FC03 response", "11 03 06 02 2B 00 00 00 64"),
    ("FC04 request", "11 04 00 08 00 01"),
    ("FC05 echo", "11 05 00 AC FF 00"),
    ("FC06 echo", "11 06 00 01 00 03"),
    ("FC07 response", "11 07 6D"),
    ("FC08 echo", "11 08 00 00 A5 37"),
    ("FC15 request", "11 0F 00 13 00 0A 02 CD 01"),
    ("FC16 response", "11 10 00 01 00 02"),
    ("Exception", "06 81 02"),
    ("Vendor exception", "01 90 42"),
    ("Truncated", "01 01 11 FF FF"),
    ("Undefined function", "01 7F 00"),
];

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .try_init()?;

    Ok(())
}

/// Accepts "06 01 05 14", "0x06,0x01", "06010514".
fn parse_hex(input: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let cleaned: String = input
        .replace("0x", "")
        .replace("0X", "")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',' && *c != ':')
        .collect();
    hex::decode(cleaned)
}

fn run(decoder: &Decoder, tcp: bool, label: &str, input: &str) {
    let bytes = match parse_hex(input) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(label, input, error = %e, "Invalid hex input");
            return;
        }
    };

    if tcp {
        match decode_tcp_frame_with(decoder, &bytes) {
            Ok((header, msg)) => info!(
                label,
                transaction_id = header.transaction_id,
                unit_id = header.unit_id,
                "{}",
                msg
            ),
            Err(e) => warn!(label, frame = %hex::encode(&bytes), framing = e.is_framing_fault(), "{}", e),
        }
    } else {
        match decoder.decode(&bytes) {
            Ok(msg) => info!(label, "{}", msg),
            Err(e) => warn!(label, frame = %hex::encode(&bytes), framing = e.is_framing_fault(), "{}", e),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;

    let mut tcp = false;
    let mut config = DecoderConfig::default();
    let mut frames = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--tcp" => tcp = true,
            "--strict" => config = config.with_strict(true),
            _ => frames.push(arg),
        }
    }
    let decoder = Decoder::new(config);

    info!(
        version = modbus_interp::VERSION,
        tcp,
        strict = decoder.config().strict,
        "Modbus Interp demo"
    );

    if frames.is_empty() {
        if tcp {
            warn!("--tcp given without frames; decoding built-in RTU samples instead");
        }
        for (label, input) in SAMPLES {
            run(&decoder, false, label, input);
        }
    } else {
        for (i, input) in frames.iter().enumerate() {
            let label = format!("arg{}", i + 1);
            run(&decoder, tcp, &label, input);
        }
    }

    Ok(())
}
