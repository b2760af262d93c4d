use std::thread;

use modbus_interp::{decode, DecodeError, Decoder, DecoderConfig, Message};

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn public_types_are_send_and_sync() {
    assert_send_sync::<Decoder>();
    assert_send_sync::<DecoderConfig>();
    assert_send_sync::<Message>();
    assert_send_sync::<DecodeError>();
}

#[test]
fn decoding_from_many_threads_matches_single_threaded() {
    let frames: Vec<Vec<u8>> = vec![
        vec![0x06, 0x01, 0x05, 0x14],
        vec![0x06, 0x81, 0x02],
        vec![0x11, 0x03, 0x06, 0x02, 0x2B, 0x00, 0x00, 0x00, 0x64],
        vec![0x11, 0x0F, 0x00, 0x13, 0x00, 0x0A, 0x02, 0xCD, 0x01],
        vec![0x01, 0x01, 0x11, 0xFF, 0xFF],
        vec![0x01, 0x7F, 0x00],
    ];
    let expected: Vec<_> = frames.iter().map(|f| decode(f)).collect();
    let decoder = Decoder::strict();

    thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                s.spawn(|| {
                    let mut last = Vec::new();
                    for _ in 0..100 {
                        last = frames.iter().map(|f| decode(f)).collect::<Vec<_>>();
                    }
                    last
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }

        // a shared configured decoder needs no coordination either
        let strict: Vec<_> = (0..4)
            .map(|_| s.spawn(|| frames.iter().map(|f| decoder.decode(f)).collect::<Vec<_>>()))
            .collect::<Vec<_>>()
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect();
        assert!(strict.windows(2).all(|w| w[0] == w[1]));
    });
}
