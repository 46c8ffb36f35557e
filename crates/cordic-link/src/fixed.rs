//! 48-bit fixed-point words on the wire.
//!
//! Angles travel as Q4.44 radians, results as Q2.46. Both are 48-bit two's
//! complement, packed low byte first into six data bytes and sign-extended
//! from bit 47 on receipt.

use crate::error::{LinkError, LinkResult};

/// Bytes per 48-bit word on the wire.
pub const WORD_BYTES: usize = 6;

/// Fractional bits of an angle (Q4.44).
pub const ANGLE_FRAC_BITS: u32 = 44;

/// Fractional bits of a cosine/sine result (Q2.46).
pub const RESULT_FRAC_BITS: u32 = 46;

/// One radian in Q4.44.
pub const ANGLE_SCALE: f64 = (1u64 << ANGLE_FRAC_BITS) as f64;

/// One unit in Q2.46.
pub const RESULT_SCALE: f64 = (1u64 << RESULT_FRAC_BITS) as f64;

const WORD_BITS: u32 = 48;
const WORD_MIN: i64 = -(1 << (WORD_BITS - 1));
const WORD_MAX: i64 = (1 << (WORD_BITS - 1)) - 1;

/// Sign-extend the low 48 bits of `raw` to a full `i64`.
#[must_use]
pub const fn sign_extend_48(raw: u64) -> i64 {
    let shift = 64 - WORD_BITS;
    ((raw << shift) as i64) >> shift
}

/// Unpack six little-endian bytes into a sign-extended 48-bit word.
#[must_use]
pub fn unpack_i48_le(bytes: [u8; WORD_BYTES]) -> i64 {
    let mut wide = [0u8; 8];
    wide[..WORD_BYTES].copy_from_slice(&bytes);
    sign_extend_48(u64::from_le_bytes(wide))
}

/// Pack the low 48 bits of `value` as six little-endian bytes.
#[must_use]
pub fn pack_i48_le(value: i64) -> [u8; WORD_BYTES] {
    let wide = value.to_le_bytes();
    let mut out = [0u8; WORD_BYTES];
    out.copy_from_slice(&wide[..WORD_BYTES]);
    out
}

/// Whether `value` is representable as a 48-bit two's complement word.
#[must_use]
pub const fn fits_48(value: i64) -> bool {
    value >= WORD_MIN && value <= WORD_MAX
}

/// Convert radians to a Q4.44 wire angle, rounding to nearest.
///
/// # Errors
///
/// Returns [`LinkError::AngleOutOfRange`] if the angle is not finite or lies
/// outside `[-8, 8)` radians.
pub fn angle_from_radians(radians: f64) -> LinkResult<i64> {
    let scaled = (radians * ANGLE_SCALE).round();
    if !scaled.is_finite() || scaled < WORD_MIN as f64 || scaled > WORD_MAX as f64 {
        return Err(LinkError::AngleOutOfRange(radians));
    }
    Ok(scaled as i64)
}

/// Convert degrees to a Q4.44 wire angle.
///
/// # Errors
///
/// Same as [`angle_from_radians`].
pub fn angle_from_degrees(degrees: f64) -> LinkResult<i64> {
    angle_from_radians(degrees.to_radians())
}

/// Q4.44 wire angle back to radians.
#[must_use]
pub fn angle_to_radians(angle: i64) -> f64 {
    angle as f64 / ANGLE_SCALE
}

/// Q2.46 cosine/sine result to a real value.
#[must_use]
pub fn result_to_f64(value: i64) -> f64 {
    value as f64 / RESULT_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_extend() {
        assert_eq!(sign_extend_48(0x0000_7FFF_FFFF_FFFF), WORD_MAX);
        assert_eq!(sign_extend_48(0x0000_8000_0000_0000), WORD_MIN);
        assert_eq!(sign_extend_48(0x0000_FFFF_FFFF_FFFF), -1);
        // upper 16 bits are discarded
        assert_eq!(sign_extend_48(0xABCD_0000_0000_0001), 1);
    }

    #[test]
    fn test_unpack_little_endian() {
        let bytes = [0xBA, 0x16, 0x1C, 0xA9, 0x60, 0x08];
        assert_eq!(unpack_i48_le(bytes), 0x0860_A91C_16BA);
        assert_eq!(unpack_i48_le([0xFF; 6]), -1);
        assert_eq!(unpack_i48_le([0, 0, 0, 0, 0, 0x80]), WORD_MIN);
    }

    #[test]
    fn test_pack_negative() {
        assert_eq!(pack_i48_le(-21), [0xEB, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(pack_i48_le(0x3FFF_FFFF_FFF1), [0xF1, 0xFF, 0xFF, 0xFF, 0xFF, 0x3F]);
    }

    #[test]
    fn test_angle_from_degrees() {
        assert_eq!(angle_from_degrees(0.0), Ok(0));
        assert_eq!(angle_from_degrees(30.0), Ok(0x0860_A91C_16BA));
        assert_eq!(angle_from_degrees(-45.0), Ok(-0x0C90_FDAA_2217));
        assert_eq!(angle_from_degrees(90.0), Ok(crate::tables::PI_DIV_2));
    }

    #[test]
    fn test_angle_out_of_range() {
        assert!(angle_from_radians(8.0).is_err());
        assert!(angle_from_radians(f64::NAN).is_err());
        assert!(angle_from_radians(-8.0).is_ok());
        assert!(angle_from_degrees(458.0).is_ok());
        assert!(angle_from_degrees(459.0).is_err());
    }

    #[test]
    fn test_angle_scale_round_trip() -> LinkResult<()> {
        assert_eq!(angle_from_radians(1.0)?, 1i64 << ANGLE_FRAC_BITS);
        for angle in [0, 1, -1, crate::tables::PI_DIV_2, -crate::tables::PI, WORD_MAX, WORD_MIN] {
            assert_eq!(angle_from_radians(angle_to_radians(angle))?, angle);
        }
        Ok(())
    }

    #[test]
    fn test_result_scale() {
        let unity = 1i64 << RESULT_FRAC_BITS;
        assert!((result_to_f64(unity) - 1.0).abs() < f64::EPSILON);
        assert!((angle_to_radians(crate::tables::PI) - std::f64::consts::PI).abs() < 1e-12);
    }
}
