//! Packet integrity code: bit-serial CRC-8, generator 0x9B, MSB first, seed 0,
//! no final XOR.
//!
//! Receiver and transmitter keep independent accumulators, both reset at the
//! start of every packet. A packet checks out when absorbing every byte
//! including the trailing check byte leaves the accumulator at zero.

/// CRC-8 generator polynomial (x^8 + x^7 + x^4 + x^3 + x + 1, implicit x^8).
pub const POLY: u8 = 0x9B;

/// Running CRC-8 over the bytes of one packet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Crc8 {
    value: u8,
}

impl Crc8 {
    #[must_use]
    pub const fn new() -> Self {
        Self { value: 0 }
    }

    /// Fold one byte into the accumulator.
    pub fn absorb(&mut self, byte: u8) {
        self.value = absorb_byte(self.value, byte);
    }

    /// Fold every byte of `bytes` in order.
    pub fn absorb_all(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.absorb(byte);
        }
    }

    /// Current accumulator value. Before the check byte this is the value the
    /// transmitter appends; after it, zero means the packet is intact.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.value
    }

    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.value == 0
    }

    pub fn reset(&mut self) {
        self.value = 0;
    }
}

const fn absorb_byte(crc: u8, byte: u8) -> u8 {
    let mut crc = crc ^ byte;
    let mut i = 0;
    while i < 8 {
        crc = if crc & 0x80 != 0 {
            (crc << 1) ^ POLY
        } else {
            crc << 1
        };
        i += 1;
    }
    crc
}

/// CRC-8 of a whole byte slice from a zero seed.
#[must_use]
pub fn compute_crc8(data: &[u8]) -> u8 {
    let mut crc = Crc8::new();
    crc.absorb_all(data);
    crc.value()
}
