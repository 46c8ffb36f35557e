//! Scenario tests for the packet engine.

use cordic_link::fixed::pack_i48_le;
use cordic_link::frame;
use cordic_link::prelude::*;
use cordic_link::{compute_crc8, tables};

type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Append the CRC and frame every byte.
fn packet(body: &[u8]) -> Vec<u16> {
    let mut bytes = body.to_vec();
    bytes.push(compute_crc8(body));
    bytes.into_iter().map(frame::encode).collect()
}

fn enabled_engine() -> PacketEngine {
    PacketEngine::new(EngineConfig::new(true))
}

fn error_frames() -> Vec<u16> {
    Response::Error.to_frames()
}

mod enable_disable_scenarios {
    use super::*;

    /// Scenario: ENABLE then SINGLE(0) returns the unity vector
    #[test]
    fn scenario_enable_then_single_zero() -> TestResult {
        let mut engine = PacketEngine::default();
        assert_eq!(engine.process(&packet(&[0x5A, 0xE2])), Some(Response::Enable));

        let reply = engine.process(&client::request_frames(&Request::Single(0)));
        let Some(Response::Single(pair)) = reply else {
            return Err(format!("expected single reply, got {reply:?}").into());
        };
        assert_eq!(pair.cos, 0x3FFF_FFFF_FFF1);
        assert_eq!(pair.sin, -21);
        Ok(())
    }

    /// Scenario: DISABLE then SINGLE(0) emits nothing
    #[test]
    fn scenario_disable_then_single_is_silent() {
        let mut engine = enabled_engine();
        assert_eq!(engine.process(&packet(&[0x5A, 0xE1])), Some(Response::Disable));
        assert_eq!(
            engine.process(&client::request_frames(&Request::Single(0))),
            None
        );
        assert_eq!(engine.stats().rotations, 1);
        assert_eq!(engine.stats().suppressed, 1);
    }

    /// Scenario: ENABLE acknowledged when already enabled
    #[test]
    fn scenario_enable_is_idempotent() {
        let mut engine = enabled_engine();
        assert_eq!(engine.process(&packet(&[0x5A, 0xE2])), Some(Response::Enable));
        assert_eq!(engine.process(&packet(&[0x5A, 0xE2])), Some(Response::Enable));
        assert!(engine.transmit_enabled());
    }

    /// Scenario: Error replies are sent even while disabled
    #[test]
    fn scenario_error_not_suppressed() {
        let mut engine = PacketEngine::default();
        assert!(!engine.transmit_enabled());
        let reply = engine.process(&packet(&[0x5A, 0xD3]));
        assert_eq!(reply, Some(Response::Error));
    }

    /// Scenario: A rejected ENABLE does not change the flag
    #[test]
    fn scenario_corrupt_enable_keeps_state() {
        let mut engine = PacketEngine::default();
        let mut frames = packet(&[0x5A, 0xE2]);
        frames[2] = frame::encode(0x00);
        assert_eq!(engine.process(&frames), Some(Response::Error));
        assert!(!engine.transmit_enabled());
    }
}

mod transform_scenarios {
    use super::*;

    /// Scenario: Burst of three returns three pairs in order
    #[test]
    fn scenario_burst_of_three() -> TestResult {
        let thetas = [0, tables::PI_DIV_2, -tables::PI / 4];
        let mut body = vec![0x5A, 0xD2, 3];
        for theta in thetas {
            body.extend_from_slice(&pack_i48_le(theta));
        }

        let mut engine = enabled_engine();
        let reply = engine.process(&packet(&body)).ok_or("reply suppressed")?;
        assert_eq!(reply.command(), Command::BurstTransform);
        let expected: Vec<SinCos> = thetas.iter().map(|&t| rotate(t)).collect();
        assert_eq!(reply.results(), expected.as_slice());
        assert_eq!(reply.wire_len(), 4 + 3 * 12);
        Ok(())
    }

    /// Scenario: Maximum burst of eight
    #[test]
    fn scenario_burst_of_eight() -> TestResult {
        let degrees = [0.0, 45.0, 90.0, 135.0, 180.0, -135.0, -90.0, -45.0];
        let request = client::burst_degrees(&degrees)?;
        let mut engine = enabled_engine();
        let reply = engine
            .process(&client::request_frames(&request))
            .ok_or("reply suppressed")?;
        assert_eq!(reply.results().len(), 8);
        assert_eq!(reply.to_bytes().len(), cordic_link::MAX_RESPONSE_LEN);

        for (reading, deg) in client::readings(&reply).iter().zip(degrees) {
            let rad = f64::to_radians(deg);
            assert!((reading.cos - rad.cos()).abs() < 1e-9, "cos({deg})");
            assert!((reading.sin - rad.sin()).abs() < 1e-9, "sin({deg})");
        }
        Ok(())
    }

    /// Scenario: Reply re-checks to zero on the host side
    #[test]
    fn scenario_reply_passes_host_crc() -> TestResult {
        let request = client::single_degrees(-120.0)?;
        let mut engine = enabled_engine();
        let reply = engine
            .process(&client::request_frames(&request))
            .ok_or("reply suppressed")?;
        let bytes = reply.to_bytes();
        assert_eq!(compute_crc8(&bytes), 0);
        assert_eq!(bytes.len(), client::expected_response_len(&request));
        assert_eq!(client::parse_response_bytes(&bytes)?, reply);
        Ok(())
    }

    /// Scenario: Negative angle sign-extends from bit 47
    #[test]
    fn scenario_negative_angle_sign_extended() -> TestResult {
        let theta = -(tables::PI / 6);
        let mut body = vec![0x5A, 0xD1];
        body.extend_from_slice(&pack_i48_le(theta));
        let mut engine = enabled_engine();
        let reply = engine.process(&packet(&body)).ok_or("reply suppressed")?;
        assert_eq!(reply, Response::Single(rotate(theta)));
        assert!(reply.results()[0].sin < 0);
        Ok(())
    }
}

mod rejection_scenarios {
    use super::*;

    fn assert_rejected(frames: &[u16], kind: ErrorKind) -> TestResult {
        let mut engine = enabled_engine();
        let Err(err) = engine.try_decode(frames) else {
            return Err("packet was accepted".into());
        };
        assert_eq!(err.kind(), kind, "unexpected error {err}");
        let reply = engine.process(frames).ok_or("error reply suppressed")?;
        assert_eq!(reply.to_frames(), error_frames());
        Ok(())
    }

    /// Scenario: Header 0x5B, correctly framed
    #[test]
    fn scenario_wrong_header() -> TestResult {
        assert_rejected(&packet(&[0x5B, 0xE2]), ErrorKind::Header)?;
        Ok(())
    }

    /// Scenario: Unknown command byte
    #[test]
    fn scenario_unknown_command() -> TestResult {
        assert_rejected(&packet(&[0x5A, 0xD3]), ErrorKind::Command)?;
        assert_rejected(&packet(&[0x5A, 0x01]), ErrorKind::Command)?;
        Ok(())
    }

    /// Scenario: Burst count 0 with a valid CRC
    #[test]
    fn scenario_burst_count_zero() -> TestResult {
        assert_rejected(&packet(&[0x5A, 0xD2, 0]), ErrorKind::BurstCount)?;
        Ok(())
    }

    /// Scenario: Burst count 9 with a valid CRC
    #[test]
    fn scenario_burst_count_nine() -> TestResult {
        let mut body = vec![0x5A, 0xD2, 9];
        body.extend(std::iter::repeat_n(0u8, 9 * 6));
        assert_rejected(&packet(&body), ErrorKind::BurstCount)?;
        Ok(())
    }

    /// Scenario: Wrong integrity byte
    #[test]
    fn scenario_integrity_mismatch() -> TestResult {
        let mut frames = client::request_frames(&Request::Single(1234));
        let last = frames.len() - 1;
        let (_, check) = frame::decode(frames[last]);
        frames[last] = frame::encode(check ^ 0x01);
        assert_rejected(&frames, ErrorKind::Integrity)?;
        Ok(())
    }

    /// Scenario: Parity flipped on an angle byte
    #[test]
    fn scenario_angle_parity_error() -> TestResult {
        let mut frames = client::request_frames(&Request::Single(1234));
        frames[4] ^= 1 << 9;
        assert_rejected(&frames, ErrorKind::Frame)?;
        let engine = PacketEngine::default();
        assert_eq!(
            engine.try_decode(&frames).err().and_then(|e| e.field()),
            Some(Field::Angle { index: 0, byte: 2 })
        );
        Ok(())
    }

    /// Scenario: Stop bit low on the burst count
    #[test]
    fn scenario_burst_count_stop_bit() -> TestResult {
        let mut frames = packet(&[0x5A, 0xD2, 1, 0, 0, 0, 0, 0, 0]);
        frames[2] &= !(1 << 10);
        assert_rejected(&frames, ErrorKind::Frame)?;
        Ok(())
    }

    /// Scenario: Burst declares two angles but carries one
    #[test]
    fn scenario_burst_truncated() -> TestResult {
        let mut body = vec![0x5A, 0xD2, 2];
        body.extend_from_slice(&pack_i48_le(7));
        assert_rejected(&packet(&body), ErrorKind::Length)?;
        Ok(())
    }

    /// Scenario: Empty input
    #[test]
    fn scenario_empty_input() -> TestResult {
        assert_rejected(&[], ErrorKind::Length)?;
        Ok(())
    }

    /// Scenario: Frames after the integrity byte
    #[test]
    fn scenario_trailing_frames() -> TestResult {
        let mut frames = packet(&[0x5A, 0xE1]);
        frames.push(frame::encode(0x00));
        assert_rejected(&frames, ErrorKind::Length)?;

        let mut lenient = PacketEngine::new(
            EngineConfig::builder()
                .accept_trailing_frames(true)
                .build(),
        );
        assert_eq!(lenient.process(&frames), Some(Response::Disable));
        Ok(())
    }
}
