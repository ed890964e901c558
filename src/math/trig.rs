//! Fast trigonometry for hot paths
//!
//! `sin`/`cos` range-reduce in f64 (exactly, for huge inputs) and only ever
//! call the standard library inside ±45°, where it is most accurate.
//! `atan`/`atan2` use a cubic polynomial and trade ~0.3° of accuracy for
//! speed. All functions take and return radians.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};
use std::f64::consts::{FRAC_PI_2 as FRAC_PI_2_F64, PI as PI_F64, TAU as TAU_F64};

const ATAN_C1: f32 = 0.972_394_1;
const ATAN_C3: f32 = 0.191_947_95;

/// Above this magnitude `%` against an f64 2π drifts; switch to exact reduction
const EXACT_REDUCTION_THRESHOLD: f64 = (1u64 << 29) as f64;

/// Leading bits of 4/π: the integer part, then 64-bit fraction words
const FOUR_OVER_PI: [u64; 6] = [
    0x0000_0000_0000_0001,
    0x45f3_06dc_9c88_2a53,
    0xf84e_afa3_ea69_bb81,
    0xb6c5_2b32_7887_2083,
    0xfca2_c757_bd77_8ac3,
    0x6e48_dc74_849b_a5c0,
];

/// 64 bits of 4/π starting `shift` bits into word `i`
#[inline]
fn four_over_pi_window(i: usize, shift: u32) -> u64 {
    if shift == 0 {
        FOUR_OVER_PI[i]
    } else {
        (FOUR_OVER_PI[i] << shift) | (FOUR_OVER_PI[i + 1] >> (64 - shift))
    }
}

/// Fraction of a whole turn in `x / 2π`, for `x >= 2^29`
///
/// Payne-Hanek: multiply the mantissa by just the window of 4/π bits that
/// lands near the binary point. Bits above it are whole multiples of 8
/// octants and drop out of the wrapping product.
fn turn_fraction(x: f64) -> f64 {
    let bits = x.to_bits();
    let exp = ((bits >> 52) & 0x7ff) as i32 - 1023 - 52;
    let mantissa = (bits & ((1u64 << 52) - 1)) | (1u64 << 52);

    // exp >= -23 for every f64 converted from an f32 above the threshold, and
    // exp <= 75 keeps the window inside the table
    let offset = (exp + 61) as u32;
    let (i, shift) = ((offset / 64) as usize, offset % 64);
    let z0 = four_over_pi_window(i, shift);
    let z1 = four_over_pi_window(i + 1, shift);
    let z2 = four_over_pi_window(i + 2, shift);

    let z2_hi = ((z2 as u128 * mantissa as u128) >> 64) as u64;
    let z1_full = z1 as u128 * mantissa as u128;
    let (z1_hi, z1_lo) = ((z1_full >> 64) as u64, z1_full as u64);
    let z0_lo = z0.wrapping_mul(mantissa);

    let (_, carry) = z1_lo.overflowing_add(z2_hi);
    let octants = z0_lo.wrapping_add(z1_hi).wrapping_add(carry as u64);
    // Fixed point: the top 3 bits count octants, so the whole word is turns
    octants as f64 / 18_446_744_073_709_551_616.0
}

/// Reduce into `[-π, π]`, keeping the sign of the input
fn reduce(radians: f32) -> f64 {
    let x = radians as f64;
    let magnitude = x.abs();
    let wrapped = if magnitude < EXACT_REDUCTION_THRESHOLD {
        magnitude % TAU_F64
    } else {
        turn_fraction(magnitude) * TAU_F64
    };
    let wrapped = if wrapped > PI_F64 {
        wrapped - TAU_F64
    } else {
        wrapped
    };
    if x < 0.0 { -wrapped } else { wrapped }
}

/// Sine of an angle already in `[-π, π + π/2]`
#[inline]
fn sin_reduced(reduced: f64) -> f32 {
    let reduced = if reduced > PI_F64 {
        reduced - TAU_F64
    } else {
        reduced
    };
    let mut x = reduced as f32;

    // Into [-π/2, π/2] by reflection
    if x > FRAC_PI_2 {
        x = PI - x;
    } else if x < -FRAC_PI_2 {
        x = -PI - x;
    }

    if x.abs() <= FRAC_PI_4 {
        x.sin()
    } else {
        (FRAC_PI_2 - x.abs()).cos().copysign(x)
    }
}

/// Sine of an angle in radians
///
/// Non-finite input returns 0.
#[inline]
pub fn sin(radians: f32) -> f32 {
    if !radians.is_finite() {
        return 0.0;
    }
    sin_reduced(reduce(radians))
}

/// Cosine of an angle in radians, as `sin(x + π/2)`
///
/// The quarter turn is added after reduction so large inputs keep their
/// precision. Non-finite input returns 0.
#[inline]
pub fn cos(radians: f32) -> f32 {
    if !radians.is_finite() {
        return 0.0;
    }
    sin_reduced(reduce(radians) + FRAC_PI_2_F64)
}

/// `(sin, cos)` pair
#[inline]
pub fn sin_cos(radians: f32) -> (f32, f32) {
    (sin(radians), cos(radians))
}

/// Arctangent approximation, accurate to ~0.005 rad for `z` in `[-1, 1]`
///
/// Outside that range the polynomial diverges; use [`atan2`] instead.
#[inline]
pub fn atan(z: f32) -> f32 {
    ATAN_C1 * z - ATAN_C3 * z * z * z
}

/// Four-quadrant arctangent of `y / x`, in `[-π, π]`
///
/// Returns 0 for `(0, 0)` and for non-finite input.
pub fn atan2(y: f32, x: f32) -> f32 {
    if !(x.is_finite() && y.is_finite()) {
        return 0.0;
    }

    let ax = x.abs();
    let ay = y.abs();
    if ax == 0.0 && ay == 0.0 {
        return 0.0;
    }

    // Keep the polynomial argument inside [0, 1]
    let invert = ay > ax;
    let z = if invert { ax / ay } else { ay / ax };

    let mut theta = atan(z);
    if invert {
        theta = FRAC_PI_2 - theta;
    }
    if x < 0.0 {
        theta = PI - theta;
    }
    theta.copysign(y)
}
