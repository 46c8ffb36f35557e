//! Link error types.
//!
//! Every validation failure on the inbound side is one of these. The engine
//! never lets them cross its boundary: `PacketEngine::process` turns each one
//! into the same fixed error packet. They stay typed so that diagnostics and
//! the host-side client can tell the causes apart.

use thiserror::Error;

use crate::packet::Field;

/// Coarse classification of a [`LinkError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// Start, stop or parity bit of a frame was wrong.
    Frame,
    /// Header byte was not the sentinel.
    Header,
    /// Command byte was not legal in its position.
    Command,
    /// Burst count outside `1..=8`.
    BurstCount,
    /// Integrity byte did not reduce the accumulator to zero.
    Integrity,
    /// Packet or buffer had the wrong number of elements.
    Length,
    /// A real value could not be represented in the wire format.
    Conversion,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LinkError {
    #[error("Frame error in {field}: container 0x{raw:04X} failed start/stop/parity check")]
    Frame { field: Field, raw: u16 },

    #[error("Header mismatch: expected 0x5A, got 0x{0:02X}")]
    HeaderMismatch(u8),

    #[error("Unknown command: 0x{0:02X}")]
    UnknownCommand(u8),

    #[error("Burst count out of range: {0} (valid 1-8)")]
    BurstCountOutOfRange(u8),

    #[error("Integrity mismatch: accumulator residue 0x{residue:02X} after check byte 0x{check:02X}")]
    IntegrityMismatch { check: u8, residue: u8 },

    #[error("Packet truncated: {field} missing after {received} frames")]
    Truncated { field: Field, received: usize },

    #[error("Trailing frames: {extra} frames after the integrity byte")]
    TrailingFrames { extra: usize },

    #[error("Invalid buffer length: expected at least {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Unexpected command in response: 0x{0:02X}")]
    UnexpectedCommand(u8),

    #[error("Angle out of range: {0} rad does not fit Q4.44")]
    AngleOutOfRange(f64),
}

pub type LinkResult<T> = Result<T, LinkError>;

impl LinkError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Frame { .. } => ErrorKind::Frame,
            Self::HeaderMismatch(_) => ErrorKind::Header,
            Self::UnknownCommand(_) | Self::UnexpectedCommand(_) => ErrorKind::Command,
            Self::BurstCountOutOfRange(_) => ErrorKind::BurstCount,
            Self::IntegrityMismatch { .. } => ErrorKind::Integrity,
            Self::Truncated { .. } | Self::TrailingFrames { .. } | Self::InvalidLength { .. } => {
                ErrorKind::Length
            }
            Self::AngleOutOfRange(_) => ErrorKind::Conversion,
        }
    }

    /// The packet field this error was raised on, if any.
    #[must_use]
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::Frame { field, .. } | Self::Truncated { field, .. } => Some(*field),
            Self::HeaderMismatch(_) => Some(Field::Header),
            Self::UnknownCommand(_) | Self::UnexpectedCommand(_) => Some(Field::Command),
            Self::BurstCountOutOfRange(_) => Some(Field::BurstCount),
            Self::IntegrityMismatch { .. } => Some(Field::Integrity),
            Self::TrailingFrames { .. } | Self::InvalidLength { .. } | Self::AngleOutOfRange(_) => {
                None
            }
        }
    }
}
