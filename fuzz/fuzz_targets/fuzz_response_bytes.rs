//! Fuzzes the host-side reply parser.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_response_bytes
#![no_main]
use cordic_link::client::parse_response_bytes;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Must never panic on arbitrary bytes; accepted input re-encodes exactly.
    if let Ok(response) = parse_response_bytes(data) {
        assert_eq!(response.to_bytes(), data);
    }
});
