//! Constant tables for the 48-iteration CORDIC kernel.
//!
//! These values are the exact integers baked into the hardware unit. They are
//! never recomputed from trigonometric functions: the last bits carry the
//! hardware's rounding and the outputs must match it bit for bit.
//!
//! Gain and arctangent entries are Q2.46 (46 fractional bits). The pi
//! multiples are the range-reduction thresholds on the incoming Q4.44 angle.

/// Number of rotation steps.
pub const ITERATIONS: usize = 48;

/// Cumulative gain compensation `K[n] = prod_{i<=n} 1/sqrt(1 + 2^-2i)`, Q2.46.
///
/// The kernel is seeded with `GAIN[ITERATIONS - 1]`.
pub const GAIN: [i64; ITERATIONS] = [
    0x2D41_3CCC_FE78,
    0x287A_26C4_9092,
    0x2744_C374_DAF4,
    0x26F7_2283_BD68,
    0x26E3_B583_05DE,
    0x26DE_D9F5_7B2C,
    0x26DD_A30D_3E50,
    0x26DD_5552_E164,
    0x26DD_41E4_454E,
    0x26DD_3D08_9DFA,
    0x26DD_3BD1_B421,
    0x26DD_3B83_F9AA,
    0x26DD_3B70_8B0C,
    0x26DD_3B6B_AF65,
    0x26DD_3B6A_787B,
    0x26DD_3B6A_2AC0,
    0x26DD_3B6A_1752,
    0x26DD_3B6A_1276,
    0x26DD_3B6A_113F,
    0x26DD_3B6A_10F2,
    0x26DD_3B6A_10DE,
    0x26DD_3B6A_10D9,
    0x26DD_3B6A_10D8,
    0x26DD_3B6A_10D8,
    0x26DD_3B6A_10D8,
    0x26DD_3B6A_10D8,
    0x26DD_3B6A_10D8,
    0x26DD_3B6A_10D8,
    0x26DD_3B6A_10D8,
    0x26DD_3B6A_10D8,
    0x26DD_3B6A_10D8,
    0x26DD_3B6A_10D8,
    0x26DD_3B6A_10D8,
    0x26DD_3B6A_10D8,
    0x26DD_3B6A_10D8,
    0x26DD_3B6A_10D8,
    0x26DD_3B6A_10D8,
    0x26DD_3B6A_10D8,
    0x26DD_3B6A_10D8,
    0x26DD_3B6A_10D8,
    0x26DD_3B6A_10D8,
    0x26DD_3B6A_10D8,
    0x26DD_3B6A_10D8,
    0x26DD_3B6A_10D8,
    0x26DD_3B6A_10D8,
    0x26DD_3B6A_10D8,
    0x26DD_3B6A_10D8,
    0x26DD_3B6A_10D8,
];

/// `atan(2^-i)` for each step, Q2.46.
pub const ATAN: [i64; ITERATIONS] = [
    0x3243_F6A8_885A,
    0x1DAC_6705_61BB,
    0x0FAD_BAFC_9640,
    0x07F5_6EA6_AB0C,
    0x03FE_AB76_E5A0,
    0x01FF_D55B_BA97,
    0x00FF_FAAA_DDDC,
    0x007F_FF55_56EF,
    0x003F_FFEA_AAB7,
    0x001F_FFFD_5556,
    0x000F_FFFF_AAAB,
    0x0007_FFFF_F555,
    0x0003_FFFF_FEAB,
    0x0001_FFFF_FFD5,
    0x0000_FFFF_FFFB,
    0x0000_7FFF_FFFF,
    0x0000_4000_0000,
    0x0000_2000_0000,
    0x0000_1000_0000,
    0x0000_0800_0000,
    0x0000_0400_0000,
    0x0000_0200_0000,
    0x0000_0100_0000,
    0x0000_0080_0000,
    0x0000_0040_0000,
    0x0000_0020_0000,
    0x0000_0010_0000,
    0x0000_0008_0000,
    0x0000_0004_0000,
    0x0000_0002_0000,
    0x0000_0001_0000,
    0x0000_0000_8000,
    0x0000_0000_4000,
    0x0000_0000_2000,
    0x0000_0000_1000,
    0x0000_0000_0800,
    0x0000_0000_0400,
    0x0000_0000_0200,
    0x0000_0000_0100,
    0x0000_0000_0080,
    0x0000_0000_0040,
    0x0000_0000_0020,
    0x0000_0000_0010,
    0x0000_0000_0008,
    0x0000_0000_0004,
    0x0000_0000_0002,
    0x0000_0000_0001,
    0x0000_0000_0001,
];

/// pi/2 in Q4.44.
pub const PI_DIV_2: i64 = 0x1921_FB54_442D;
/// pi in Q4.44.
pub const PI: i64 = 0x3243_F6A8_885A;
/// 3*pi/2 in Q4.44.
pub const PI_MULT_3_DIV_2: i64 = 0x4B65_F1FC_CC87;
/// 2*pi in Q4.44.
pub const PI_MULT_2: i64 = 0x6487_ED51_10B4;
