use modbus_interp::{
    decode, decode_tcp_frame, DecodeError, Decoder, DecoderConfig, ExceptionCode, FunctionCode,
    Message, Shape,
};

const READ_COILS_RESP: &[u8] = &[0x06, 0x01, 0x05, 0x14];
const READ_COILS_EXC: &[u8] = &[0x06, 0x81, 0x02];
const READ_HOLDING_REQ: &[u8] = &[0x11, 0x03, 0x00, 0x6B, 0x00, 0x03];
const READ_HOLDING_RESP: &[u8] = &[0x11, 0x03, 0x06, 0x02, 0x2B, 0x00, 0x00, 0x00, 0x64];
const WRITE_COILS_REQ: &[u8] = &[0x11, 0x0F, 0x00, 0x13, 0x00, 0x0A, 0x02, 0xCD, 0x01];
const WRITE_REGS_REQ: &[u8] = &[
    0x11, 0x10, 0x00, 0x01, 0x00, 0x02, 0x04, 0x00, 0x0A, 0x01, 0x02,
];

#[test]
fn good_coil_response() {
    let expected = Message {
        slave_address: 0x06,
        function_code: FunctionCode::ReadCoils,
        shape: Shape::Response,
        error_code: ExceptionCode::NoError,
        starting_address: None,
        quantity: Some(5),
        byte_count: Some(1),
        sub_function: None,
        values: vec![0, 0, 1, 0, 1],
    };
    assert_eq!(decode(READ_COILS_RESP).unwrap(), expected);
}

#[test]
fn wrong_coil_values_do_not_compare_equal() {
    let wrong = Message {
        values: vec![1, 0, 1, 0, 1],
        ..decode(READ_COILS_RESP).unwrap()
    };
    assert_ne!(decode(READ_COILS_RESP).unwrap(), wrong);
}

#[test]
fn error_02_on_coils() {
    let msg = decode(READ_COILS_EXC).unwrap();
    assert!(msg.has_error());
    assert_eq!(msg.error_code, ExceptionCode::IllegalDataAddress);
    assert_eq!(msg.function_code, FunctionCode::ReadCoils);
    assert!(msg.values.is_empty());
}

#[test]
fn exception_for_every_function_code() {
    for function in FunctionCode::ALL {
        let frame = [0x01, function.as_u8() | 0x80, 0x04];
        let msg = decode(&frame).unwrap();
        assert_eq!(msg.function_code, function);
        assert_eq!(msg.error_code, ExceptionCode::SlaveDeviceFailure);
        assert_eq!(msg.shape, Shape::Exception);
    }
}

#[test]
fn every_defined_function_code_has_a_decoder_arm() {
    // A well-formed frame per function code; Undefined is the one rejection.
    let frames: [(FunctionCode, &[u8]); 11] = [
        (FunctionCode::Undefined, &[0x01, 0x00, 0x00]),
        (FunctionCode::ReadCoils, READ_COILS_RESP),
        (FunctionCode::ReadDiscreteInputs, &[0x01, 0x02, 0x01, 0x01]),
        (FunctionCode::ReadHoldingRegisters, READ_HOLDING_RESP),
        (FunctionCode::ReadInputRegister, &[0x01, 0x04, 0x02, 0x12, 0x34]),
        (FunctionCode::WriteSingleCoil, &[0x01, 0x05, 0x00, 0x01, 0xFF, 0x00]),
        (FunctionCode::WriteSingleRegister, &[0x01, 0x06, 0x00, 0x01, 0x12, 0x34]),
        (FunctionCode::SlReadExceptionStatus, &[0x01, 0x07, 0x01]),
        (FunctionCode::SlDiagnostics, &[0x01, 0x08, 0x00, 0x00, 0x12, 0x34]),
        (FunctionCode::WriteMultipleCoils, WRITE_COILS_REQ),
        (FunctionCode::WriteMultipleRegisters, WRITE_REGS_REQ),
    ];

    for (function, frame) in frames {
        match decode(frame) {
            Ok(msg) => {
                assert_ne!(function, FunctionCode::Undefined);
                assert_eq!(msg.function_code, function);
                assert!(!msg.has_error());
            }
            Err(err) => {
                assert_eq!(function, FunctionCode::Undefined);
                assert_eq!(err, DecodeError::UndefinedFunctionCode { code: 0x00 });
            }
        }
    }
}

#[test]
fn read_holding_request_and_response() {
    let req = decode(READ_HOLDING_REQ).unwrap();
    assert!(req.is_request());
    assert_eq!(req.starting_address, Some(0x006B));
    assert_eq!(req.quantity, Some(3));
    assert_eq!(req.byte_count, None);

    let resp = decode(READ_HOLDING_RESP).unwrap();
    assert!(resp.is_response());
    assert_eq!(resp.starting_address, None);
    assert_eq!(resp.byte_count, Some(6));
    assert_eq!(resp.values, vec![0x022B, 0x0000, 0x0064]);
}

#[test]
fn write_multiple_requests() {
    let coils = decode(WRITE_COILS_REQ).unwrap();
    assert_eq!(coils.values.len(), 10);
    assert_eq!(
        coils.coils().collect::<Vec<_>>(),
        vec![true, false, true, true, false, false, true, true, true, false]
    );

    let regs = decode(WRITE_REGS_REQ).unwrap();
    assert_eq!(regs.starting_address, Some(1));
    assert_eq!(regs.values, vec![0x000A, 0x0102]);
}

#[test]
fn write_multiple_coils_echo_response() {
    let msg = decode(&WRITE_COILS_REQ[..6]).unwrap();
    assert_eq!(msg.function_code, FunctionCode::WriteMultipleCoils);
    assert_eq!(msg.shape, Shape::Response);
    assert_eq!(msg.starting_address, Some(0x13));
    assert_eq!(msg.quantity, Some(10));
    assert!(msg.values.is_empty());
}

#[test]
fn write_single_coil_rejects_values_other_than_on_or_off() {
    let off = decode(&[0x11, 0x05, 0x00, 0xAC, 0x00, 0x00]).unwrap();
    assert_eq!(off.values, vec![0]);

    let err = decode(&[0x11, 0x05, 0x00, 0xAC, 0x12, 0x34]).unwrap_err();
    assert_eq!(err, DecodeError::InvalidCoilValue { value: 0x1234 });
    assert!(err.is_protocol_violation());
}

#[test]
fn short_buffers_fail_before_anything_else() {
    assert_eq!(
        decode(&[]).unwrap_err(),
        DecodeError::TooShort { len: 0, min: 3 }
    );
    assert_eq!(
        decode(&[0x06]).unwrap_err(),
        DecodeError::TooShort { len: 1, min: 3 }
    );
    // Even a function byte with the exception flag needs its exception code
    assert_eq!(
        decode(&[0x06, 0x81]).unwrap_err(),
        DecodeError::TooShort { len: 2, min: 3 }
    );
}

#[test]
fn undefined_function_code_7f() {
    let err = decode(&[0x06, 0x7F, 0x00, 0x00]).unwrap_err();
    assert_eq!(err, DecodeError::UndefinedFunctionCode { code: 0x7F });
    assert!(err.is_protocol_violation());
}

#[test]
fn truncated_coil_payload_is_an_error() {
    let err = decode(&[0x06, 0x01, 0x10, 0x14]).unwrap_err();
    assert_eq!(
        err,
        DecodeError::TruncatedPayload {
            needed: 5,
            actual: 4
        }
    );
    assert!(err.is_framing_fault());
}

#[test]
fn strict_decoder_with_device_limits() {
    let decoder = Decoder::new(DecoderConfig::strict().with_max_read_registers(2));
    assert!(decoder.decode(&[0x11, 0x03, 0x00, 0x00, 0x00, 0x02]).is_ok());
    assert!(matches!(
        decoder.decode(READ_HOLDING_REQ).unwrap_err(),
        DecodeError::QuantityOutOfRange { quantity: 3, max: 2, .. }
    ));
}

#[test]
fn tcp_frame_golden() {
    let frame = [
        0x00, 0x01, 0x00, 0x00, 0x00, 0x06, 0x11, 0x03, 0x00, 0x6B, 0x00, 0x03,
    ];
    let (header, msg) = decode_tcp_frame(&frame).unwrap();
    assert_eq!(header.unit_id, 0x11);
    assert_eq!(msg, decode(READ_HOLDING_REQ).unwrap());
}

#[cfg(feature = "serde")]
#[test]
fn serde_json_roundtrip() {
    let msg = decode(READ_COILS_RESP).unwrap();
    let json = serde_json::to_string(&msg).unwrap();
    let back: Message = serde_json::from_str(&json).unwrap();
    assert_eq!(back, msg);
}
