//! Fuzzes the packet engine with arbitrary frame containers.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_request_frames
#![no_main]
use cordic_link::{EngineConfig, PacketEngine, Response, compute_crc8};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let frames: Vec<u16> = data
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    let mut engine = PacketEngine::new(EngineConfig::new(true));
    let decoded = engine.try_decode(&frames);
    let reply = engine.process(&frames);

    // Enabled engines always answer, and every answer checks to zero.
    let Some(reply) = reply else {
        panic!("enabled engine stayed silent");
    };
    assert_eq!(compute_crc8(&reply.to_bytes()), 0);
    assert_eq!(decoded.is_err(), reply == Response::Error);
});
