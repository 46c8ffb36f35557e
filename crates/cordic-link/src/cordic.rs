//! Rotation-mode CORDIC producing a fixed-point cosine/sine pair.
//!
//! The kernel takes a Q4.44 angle in radians, folds it into (-pi/2, pi/2],
//! widens it to Q2.46 and rotates the gain-compensated unit vector through 48
//! shift-and-add steps. Output is Q2.46.
//!
//! Every shift is arithmetic, and on the non-negative branch the kernel shifts
//! the negated operand (`(-y) >> i`, not `-(y >> i)`). The two differ by one
//! LSB on odd negative values, and the hardware does the former.

use crate::tables::{ATAN, GAIN, ITERATIONS, PI, PI_DIV_2, PI_MULT_2, PI_MULT_3_DIV_2};

/// Cosine and sine of one angle, both Q2.46.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SinCos {
    pub cos: i64,
    pub sin: i64,
}

impl From<SinCos> for (i64, i64) {
    fn from(value: SinCos) -> Self {
        (value.cos, value.sin)
    }
}

/// Reduce a Q4.44 angle into (-pi/2, pi/2].
///
/// Returns the reduced angle and whether the final vector must be negated
/// (an odd multiple of pi was removed).
#[must_use]
pub const fn reduce(theta: i64) -> (i64, bool) {
    if theta > PI_MULT_3_DIV_2 {
        (theta - PI_MULT_2, false)
    } else if theta > PI_DIV_2 {
        (theta - PI, true)
    } else if theta > -PI_MULT_3_DIV_2 && theta <= -PI_DIV_2 {
        (theta + PI, true)
    } else if theta <= -PI_MULT_3_DIV_2 {
        (theta + PI_MULT_2, false)
    } else {
        (theta, false)
    }
}

/// Compute `(cos theta, sin theta)` for a Q4.44 angle.
///
/// Pure and deterministic. Angles are meaningful across the 48-bit domain
/// (about +/-8 rad); wider inputs are accepted but wrap in the working angle.
#[must_use]
pub fn rotate(theta: i64) -> SinCos {
    let (reduced, negate) = reduce(theta);

    let mut x = GAIN[ITERATIONS - 1];
    let mut y: i64 = 0;
    let mut z = reduced.wrapping_shl(2);

    for (i, &atan) in ATAN.iter().enumerate() {
        let (dx, dy, dz) = if z < 0 {
            (y >> i, (-x) >> i, atan)
        } else {
            ((-y) >> i, x >> i, -atan)
        };
        x += dx;
        y += dy;
        z = z.wrapping_add(dz);
    }

    if negate {
        x = -x;
        y = -y;
    }

    SinCos { cos: x, sin: y }
}
