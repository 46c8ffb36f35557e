//! Packet shapes, field validation and packet encoding.
//!
//! Request layout (one frame per byte):
//! ```text
//! DISABLE / ENABLE : 5A  E1|E2  CRC
//! SINGLE           : 5A  D1     THETA[6]            CRC
//! BURST            : 5A  D2     N  THETA[6] x N     CRC     (1 <= N <= 8)
//! ```
//! Response layout:
//! ```text
//! DISABLE / ENABLE : 5A  E1|E2  CRC
//! SINGLE           : 5A  D1     COS[6] SIN[6]            CRC
//! BURST            : 5A  D2     N  (COS[6] SIN[6]) x N   CRC
//! ERROR            : 5A  01     CRC
//! ```
//! Multi-byte words are 48-bit little-endian. CRC is CRC-8/0x9B over every
//! preceding byte of the same packet.

use core::fmt;

use crate::cordic::SinCos;
use crate::crc::Crc8;
use crate::error::{LinkError, LinkResult};
use crate::fixed::{WORD_BYTES, pack_i48_le, unpack_i48_le};
use crate::frame;

/// Header sentinel opening every packet.
pub const HEADER: u8 = 0x5A;

/// Largest burst a single packet may carry.
pub const MAX_BURST: usize = 8;

/// Longest request on the wire: header, command, count, 8 angles, CRC.
pub const MAX_REQUEST_LEN: usize = 4 + MAX_BURST * WORD_BYTES;

/// Longest response on the wire: header, command, count, 8 pairs, CRC.
pub const MAX_RESPONSE_LEN: usize = 4 + MAX_BURST * 2 * WORD_BYTES;

/// Command byte values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Command {
    SingleTransform = 0xD1,
    BurstTransform = 0xD2,
    Disable = 0xE1,
    Enable = 0xE2,
    /// Only ever sent by the engine.
    Error = 0x01,
}

impl Command {
    pub fn from_u8(val: u8) -> Option<Self> {
        match val {
            0xD1 => Some(Self::SingleTransform),
            0xD2 => Some(Self::BurstTransform),
            0xE1 => Some(Self::Disable),
            0xE2 => Some(Self::Enable),
            0x01 => Some(Self::Error),
            _ => None,
        }
    }

    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Commands a host may send.
    pub fn is_request(self) -> bool {
        !matches!(self, Self::Error)
    }
}

/// A position inside a packet, used to locate validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Field {
    Header,
    Command,
    BurstCount,
    /// Byte `byte` (0 = least significant) of word `index`.
    Angle { index: u8, byte: u8 },
    /// Byte `byte` of the cosine or sine of pair `index` (response side).
    Result { index: u8, byte: u8 },
    Integrity,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => write!(f, "header"),
            Self::Command => write!(f, "command"),
            Self::BurstCount => write!(f, "burst count"),
            Self::Angle { index, byte } => write!(f, "angle {index} byte {byte}"),
            Self::Result { index, byte } => write!(f, "result {index} byte {byte}"),
            Self::Integrity => write!(f, "integrity byte"),
        }
    }
}

/// One unit of packet input: either a framed 16-bit container or an already
/// unframed byte.
pub trait WireUnit: Copy {
    /// `(valid, data)` for this unit.
    fn unpack(self) -> (bool, u8);

    /// The unit widened for diagnostics.
    fn raw(self) -> u16;
}

impl WireUnit for u16 {
    fn unpack(self) -> (bool, u8) {
        frame::decode(self)
    }

    fn raw(self) -> u16 {
        self
    }
}

impl WireUnit for u8 {
    fn unpack(self) -> (bool, u8) {
        (true, self)
    }

    fn raw(self) -> u16 {
        u16::from(self)
    }
}

/// Sequential reader threading one integrity accumulator through a packet.
///
/// Every byte is absorbed before it is judged, so the accumulator always
/// reflects everything received up to the failing field.
#[derive(Debug)]
pub struct PacketReader<'a, T: WireUnit> {
    units: &'a [T],
    pos: usize,
    crc: Crc8,
}

impl<'a, T: WireUnit> PacketReader<'a, T> {
    pub fn new(units: &'a [T]) -> Self {
        Self {
            units,
            pos: 0,
            crc: Crc8::new(),
        }
    }

    /// Read one byte, absorb it, and check its frame.
    pub fn read(&mut self, field: Field) -> LinkResult<u8> {
        let unit = *self.units.get(self.pos).ok_or(LinkError::Truncated {
            field,
            received: self.units.len(),
        })?;
        self.pos += 1;
        let (valid, byte) = unit.unpack();
        self.crc.absorb(byte);
        if !valid {
            return Err(LinkError::Frame {
                field,
                raw: unit.raw(),
            });
        }
        Ok(byte)
    }

    /// Read one byte and require `check` to accept it.
    pub fn read_checked(
        &mut self,
        field: Field,
        check: impl FnOnce(u8) -> LinkResult<()>,
    ) -> LinkResult<u8> {
        let byte = self.read(field)?;
        check(byte)?;
        Ok(byte)
    }

    /// Read six bytes as one sign-extended 48-bit word.
    pub fn read_word(&mut self, field: impl Fn(u8) -> Field) -> LinkResult<i64> {
        let mut bytes = [0u8; WORD_BYTES];
        for (i, slot) in (0u8..).zip(bytes.iter_mut()) {
            *slot = self.read(field(i))?;
        }
        Ok(unpack_i48_le(bytes))
    }

    /// Read the trailing integrity byte and require the accumulator to
    /// reduce to zero. Anything after it is rejected unless `allow_trailing`.
    pub fn finish(mut self, allow_trailing: bool) -> LinkResult<()> {
        let check = self.read(Field::Integrity)?;
        if !self.crc.is_zero() {
            return Err(LinkError::IntegrityMismatch {
                check,
                residue: self.crc.value(),
            });
        }
        let extra = self.units.len().saturating_sub(self.pos);
        if extra > 0 && !allow_trailing {
            return Err(LinkError::TrailingFrames { extra });
        }
        Ok(())
    }
}

/// Byte-level packet builder that appends the integrity byte on `finish`.
#[derive(Debug)]
pub struct PacketWriter<'a> {
    out: &'a mut [u8],
    len: usize,
    crc: Crc8,
}

impl<'a> PacketWriter<'a> {
    pub fn new(out: &'a mut [u8]) -> Self {
        Self {
            out,
            len: 0,
            crc: Crc8::new(),
        }
    }

    pub fn push(&mut self, byte: u8) -> LinkResult<()> {
        let capacity = self.out.len();
        let slot = self.out.get_mut(self.len).ok_or(LinkError::InvalidLength {
            expected: self.len + 1,
            actual: capacity,
        })?;
        *slot = byte;
        self.len += 1;
        self.crc.absorb(byte);
        Ok(())
    }

    pub fn push_word(&mut self, word: i64) -> LinkResult<()> {
        for byte in pack_i48_le(word) {
            self.push(byte)?;
        }
        Ok(())
    }

    /// Append the integrity byte and return the packet length.
    pub fn finish(mut self) -> LinkResult<usize> {
        let check = self.crc.value();
        self.push(check)?;
        Ok(self.len)
    }
}

fn check_burst_count(count: u8) -> LinkResult<()> {
    if (1..=MAX_BURST).contains(&usize::from(count)) {
        Ok(())
    } else {
        Err(LinkError::BurstCountOutOfRange(count))
    }
}

/// 1 to 8 values of one kind, stored inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch<T: Copy + Default> {
    len: u8,
    items: [T; MAX_BURST],
}

impl<T: Copy + Default> Batch<T> {
    /// # Errors
    ///
    /// Returns [`LinkError::BurstCountOutOfRange`] if `items` is empty or
    /// longer than [`MAX_BURST`].
    pub fn from_slice(items: &[T]) -> LinkResult<Self> {
        let count = u8::try_from(items.len()).unwrap_or(u8::MAX);
        check_burst_count(count)?;
        let mut buf = [T::default(); MAX_BURST];
        buf.iter_mut().zip(items).for_each(|(slot, &item)| *slot = item);
        Ok(Self {
            len: count,
            items: buf,
        })
    }

    /// Build by mapping another batch element-wise, preserving order.
    pub fn map<U: Copy + Default>(&self, f: impl Fn(T) -> U) -> Batch<U> {
        let mut items = [U::default(); MAX_BURST];
        items
            .iter_mut()
            .zip(self.as_slice())
            .for_each(|(slot, &item)| *slot = f(item));
        Batch {
            len: self.len,
            items,
        }
    }

    pub fn count(&self) -> u8 {
        self.len
    }

    pub fn as_slice(&self) -> &[T] {
        self.items.get(..usize::from(self.len)).unwrap_or(&[])
    }
}

/// A validated inbound packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Disable,
    Enable,
    /// One Q4.44 angle.
    Single(i64),
    /// 1 to 8 Q4.44 angles, processed in order.
    Burst(Batch<i64>),
}

impl Request {
    pub fn command(&self) -> Command {
        match self {
            Self::Disable => Command::Disable,
            Self::Enable => Command::Enable,
            Self::Single(_) => Command::SingleTransform,
            Self::Burst(_) => Command::BurstTransform,
        }
    }

    /// Number of bytes this request occupies on the wire.
    pub fn wire_len(&self) -> usize {
        match self {
            Self::Disable | Self::Enable => 3,
            Self::Single(_) => 3 + WORD_BYTES,
            Self::Burst(angles) => 4 + usize::from(angles.count()) * WORD_BYTES,
        }
    }

    /// Validate and decode one inbound packet.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure in wire order.
    pub fn decode<T: WireUnit>(units: &[T], allow_trailing: bool) -> LinkResult<Self> {
        let mut reader = PacketReader::new(units);
        reader.read_checked(Field::Header, check_header)?;
        let cmd = reader.read(Field::Command)?;
        let command = Command::from_u8(cmd)
            .filter(|c| c.is_request())
            .ok_or(LinkError::UnknownCommand(cmd))?;

        let request = match command {
            Command::Disable => Self::Disable,
            Command::Enable => Self::Enable,
            Command::SingleTransform => {
                Self::Single(reader.read_word(|byte| Field::Angle { index: 0, byte })?)
            }
            Command::BurstTransform => {
                let count = reader.read_checked(Field::BurstCount, check_burst_count)?;
                let mut angles = [0i64; MAX_BURST];
                for (index, slot) in (0u8..count).zip(angles.iter_mut()) {
                    *slot = reader.read_word(|byte| Field::Angle { index, byte })?;
                }
                Self::Burst(Batch::from_slice(
                    angles.get(..usize::from(count)).unwrap_or(&[]),
                )?)
            }
            Command::Error => return Err(LinkError::UnknownCommand(cmd)),
        };

        reader.finish(allow_trailing)?;
        Ok(request)
    }

    /// Encode as raw bytes (integrity byte included).
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::InvalidLength`] if `out` is shorter than
    /// [`Request::wire_len`].
    pub fn encode(&self, out: &mut [u8]) -> LinkResult<usize> {
        let mut w = PacketWriter::new(out);
        w.push(HEADER)?;
        w.push(self.command().to_u8())?;
        match self {
            Self::Disable | Self::Enable => {}
            Self::Single(theta) => w.push_word(*theta)?,
            Self::Burst(angles) => {
                w.push(angles.count())?;
                for &theta in angles.as_slice() {
                    w.push_word(theta)?;
                }
            }
        }
        w.finish()
    }
}

fn check_header(byte: u8) -> LinkResult<()> {
    if byte == HEADER {
        Ok(())
    } else {
        Err(LinkError::HeaderMismatch(byte))
    }
}

/// An outbound packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// Acknowledges DISABLE.
    Disable,
    /// Acknowledges ENABLE.
    Enable,
    Single(SinCos),
    Burst(Batch<SinCos>),
    /// Fixed reply to any malformed request.
    Error,
}

impl Response {
    pub fn command(&self) -> Command {
        match self {
            Self::Disable => Command::Disable,
            Self::Enable => Command::Enable,
            Self::Single(_) => Command::SingleTransform,
            Self::Burst(_) => Command::BurstTransform,
            Self::Error => Command::Error,
        }
    }

    /// Number of bytes this response occupies on the wire.
    pub fn wire_len(&self) -> usize {
        match self {
            Self::Disable | Self::Enable | Self::Error => 3,
            Self::Single(_) => 3 + 2 * WORD_BYTES,
            Self::Burst(pairs) => 4 + usize::from(pairs.count()) * 2 * WORD_BYTES,
        }
    }

    /// The cosine/sine pairs carried, in request order.
    pub fn results(&self) -> &[SinCos] {
        match self {
            Self::Single(pair) => core::slice::from_ref(pair),
            Self::Burst(pairs) => pairs.as_slice(),
            Self::Disable | Self::Enable | Self::Error => &[],
        }
    }

    /// Encode as raw bytes with a freshly computed integrity byte.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::InvalidLength`] if `out` is shorter than
    /// [`Response::wire_len`].
    pub fn encode(&self, out: &mut [u8]) -> LinkResult<usize> {
        let mut w = PacketWriter::new(out);
        w.push(HEADER)?;
        w.push(self.command().to_u8())?;
        if let Self::Burst(pairs) = self {
            w.push(pairs.count())?;
        }
        for pair in self.results() {
            w.push_word(pair.cos)?;
            w.push_word(pair.sin)?;
        }
        w.finish()
    }

    /// Encode as framed 16-bit containers.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::InvalidLength`] if `out` is shorter than
    /// [`Response::wire_len`].
    pub fn encode_frames(&self, out: &mut [u16]) -> LinkResult<usize> {
        let mut bytes = [0u8; MAX_RESPONSE_LEN];
        let len = self.encode(&mut bytes)?;
        let bytes = bytes.get(..len).unwrap_or(&[]);
        frame::encode_into(bytes, out).ok_or(LinkError::InvalidLength {
            expected: len,
            actual: out.len(),
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.wire_len()];
        // wire_len always fits
        let len = self.encode(&mut out).unwrap_or(0);
        out.truncate(len);
        out
    }

    pub fn to_frames(&self) -> Vec<u16> {
        self.to_bytes().into_iter().map(frame::encode).collect()
    }

    /// Parse a response as a host would receive it.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure in wire order.
    pub fn decode<T: WireUnit>(units: &[T]) -> LinkResult<Self> {
        let mut reader = PacketReader::new(units);
        reader.read_checked(Field::Header, check_header)?;
        let cmd = reader.read(Field::Command)?;
        let command = Command::from_u8(cmd).ok_or(LinkError::UnexpectedCommand(cmd))?;

        let response = match command {
            Command::Disable => Self::Disable,
            Command::Enable => Self::Enable,
            Command::Error => Self::Error,
            Command::SingleTransform => Self::Single(read_pair(&mut reader, 0)?),
            Command::BurstTransform => {
                let count = reader.read_checked(Field::BurstCount, check_burst_count)?;
                let mut pairs = [SinCos::default(); MAX_BURST];
                for (index, slot) in (0u8..count).zip(pairs.iter_mut()) {
                    *slot = read_pair(&mut reader, index)?;
                }
                Self::Burst(Batch::from_slice(
                    pairs.get(..usize::from(count)).unwrap_or(&[]),
                )?)
            }
        };

        reader.finish(false)?;
        Ok(response)
    }
}

fn read_pair<T: WireUnit>(reader: &mut PacketReader<'_, T>, index: u8) -> LinkResult<SinCos> {
    let cos = reader.read_word(|byte| Field::Result { index, byte })?;
    let sin = reader.read_word(|byte| Field::Result {
        index,
        byte: byte + WORD_BYTES as u8,
    })?;
    Ok(SinCos { cos, sin })
}
