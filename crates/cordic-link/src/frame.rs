//! 11-bit serial frame codec.
//!
//! Each byte on the link travels as one asynchronous-serial frame held in a
//! 16-bit container:
//!
//! ```text
//! bit  15..11   10     9       8..1     0
//!      unused   stop   parity  data     start
//! ```
//!
//! A frame is valid iff start is 0, stop is 1 and parity is the odd parity of
//! the data byte. Bits 11-15 are ignored when decoding and cleared when
//! encoding.

const START_BIT: u16 = 1 << 0;
const DATA_SHIFT: u32 = 1;
const PARITY_SHIFT: u32 = 9;
const STOP_BIT: u16 = 1 << 10;

/// Odd parity of a byte: 1 iff `byte` has an even number of set bits.
///
/// Folds the eight data bits into a seed of 1, so the zero byte has parity 1.
#[must_use]
pub const fn odd_parity(byte: u8) -> bool {
    let mut parity = true;
    let mut data = byte;
    let mut i = 0;
    while i < 8 {
        parity ^= (data & 1) != 0;
        data >>= 1;
        i += 1;
    }
    parity
}

/// A frame split into its four fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frame {
    pub start: bool,
    pub data: u8,
    pub parity: bool,
    pub stop: bool,
}

impl Frame {
    /// A well-formed frame carrying `data`.
    #[must_use]
    pub const fn new(data: u8) -> Self {
        Self {
            start: false,
            data,
            parity: odd_parity(data),
            stop: true,
        }
    }

    /// Split a 16-bit container into its fields without judging them.
    #[must_use]
    pub const fn from_container(raw: u16) -> Self {
        Self {
            start: raw & START_BIT != 0,
            data: ((raw >> DATA_SHIFT) & 0xFF) as u8,
            parity: (raw >> PARITY_SHIFT) & 1 != 0,
            stop: raw & STOP_BIT != 0,
        }
    }

    /// Pack the fields into a 16-bit container.
    #[must_use]
    pub const fn to_container(self) -> u16 {
        let mut raw = (self.data as u16) << DATA_SHIFT;
        if self.start {
            raw |= START_BIT;
        }
        if self.parity {
            raw |= 1 << PARITY_SHIFT;
        }
        if self.stop {
            raw |= STOP_BIT;
        }
        raw
    }

    /// Start low, stop high and parity matching the data byte.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        !self.start && self.stop && self.parity == odd_parity(self.data)
    }
}

/// Decode a container into `(valid, data)`.
///
/// The data byte is returned even when the frame is invalid; the receiver
/// still folds it into its integrity accumulator.
#[must_use]
pub const fn decode(raw: u16) -> (bool, u8) {
    let frame = Frame::from_container(raw);
    (frame.is_valid(), frame.data)
}

/// Encode a byte as a well-formed frame container.
#[must_use]
pub const fn encode(byte: u8) -> u16 {
    Frame::new(byte).to_container()
}

/// Encode a byte slice into `out`, one container per byte.
///
/// Returns the number of containers written (`bytes.len()`), or `None` if
/// `out` is too short.
pub fn encode_into(bytes: &[u8], out: &mut [u16]) -> Option<usize> {
    let dst = out.get_mut(..bytes.len())?;
    for (slot, &byte) in dst.iter_mut().zip(bytes) {
        *slot = encode(byte);
    }
    Some(bytes.len())
}
