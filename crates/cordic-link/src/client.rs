//! Host side of the link: build requests from real angles, parse replies back
//! into real cosine/sine values.

use crate::cordic::SinCos;
use crate::error::{LinkError, LinkResult};
use crate::fixed::{angle_from_degrees, angle_from_radians, result_to_f64};
use crate::frame;
use crate::packet::{Batch, MAX_BURST, MAX_REQUEST_LEN, Request, Response};

/// A result pair converted to real numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reading {
    pub cos: f64,
    pub sin: f64,
}

impl From<SinCos> for Reading {
    fn from(pair: SinCos) -> Self {
        Self {
            cos: result_to_f64(pair.cos),
            sin: result_to_f64(pair.sin),
        }
    }
}

/// Single-transform request for an angle in degrees.
///
/// # Errors
///
/// Returns [`LinkError::AngleOutOfRange`] if the angle does not fit Q4.44.
pub fn single_degrees(degrees: f64) -> LinkResult<Request> {
    Ok(Request::Single(angle_from_degrees(degrees)?))
}

/// Single-transform request for an angle in radians.
///
/// # Errors
///
/// Returns [`LinkError::AngleOutOfRange`] if the angle does not fit Q4.44.
pub fn single_radians(radians: f64) -> LinkResult<Request> {
    Ok(Request::Single(angle_from_radians(radians)?))
}

/// Burst request for 1 to 8 angles in degrees.
///
/// # Errors
///
/// Returns [`LinkError::BurstCountOutOfRange`] for an empty or oversized
/// burst, or [`LinkError::AngleOutOfRange`] for an unrepresentable angle.
pub fn burst_degrees(degrees: &[f64]) -> LinkResult<Request> {
    if !(1..=MAX_BURST).contains(&degrees.len()) {
        let count = u8::try_from(degrees.len()).unwrap_or(u8::MAX);
        return Err(LinkError::BurstCountOutOfRange(count));
    }
    let mut angles = Vec::with_capacity(degrees.len());
    for &deg in degrees {
        angles.push(angle_from_degrees(deg)?);
    }
    Ok(Request::Burst(Batch::from_slice(&angles)?))
}

/// Raw request bytes with the integrity byte appended.
pub fn request_bytes(request: &Request) -> Vec<u8> {
    let mut buf = [0u8; MAX_REQUEST_LEN];
    // MAX_REQUEST_LEN covers every request shape
    let len = request.encode(&mut buf).unwrap_or(0);
    buf.get(..len).unwrap_or(&[]).to_vec()
}

/// Request as framed 16-bit containers, ready for the engine.
pub fn request_frames(request: &Request) -> Vec<u16> {
    request_bytes(request)
        .into_iter()
        .map(frame::encode)
        .collect()
}

/// How many bytes a host should read back after sending `request` with
/// transmit enabled.
pub fn expected_response_len(request: &Request) -> usize {
    match request {
        Request::Disable | Request::Enable => 3,
        Request::Single(_) => 15,
        Request::Burst(angles) => 4 + 12 * usize::from(angles.count()),
    }
}

/// Parse an unframed reply as read from a serial port.
///
/// # Errors
///
/// Returns the first validation failure in wire order, including a CRC that
/// does not reduce to zero.
pub fn parse_response_bytes(bytes: &[u8]) -> LinkResult<Response> {
    Response::decode(bytes)
}

/// Parse a reply still held in frame containers.
///
/// # Errors
///
/// As [`parse_response_bytes`], plus frame errors.
pub fn parse_response_frames(frames: &[u16]) -> LinkResult<Response> {
    Response::decode(frames)
}

/// Real-valued results of a reply, in request order.
pub fn readings(response: &Response) -> Vec<Reading> {
    response.results().iter().copied().map(Reading::from).collect()
}
