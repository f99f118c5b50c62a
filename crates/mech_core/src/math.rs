//! Fixed-point math utilities for deterministic rules arithmetic.
//!
//! Fractional rules quantities such as armor fractions and run multipliers
//! are computed in fixed point so that the same unit state always produces
//! the same result on every platform.

use fixed::types::I32F32;

/// Fixed-point number type for all rules math.
///
/// Uses 32 bits for integer part and 32 bits for fractional part.
pub type Fixed = I32F32;

/// A percentage as a fixed-point fraction (`percent(25)` is 0.25).
#[must_use]
pub fn percent(value: u32) -> Fixed {
    Fixed::from_num(value) / Fixed::from_num(100)
}

/// `numerator / denominator` as a fraction.
///
/// A zero denominator means there was nothing to lose, so the ratio is 1.
#[must_use]
pub fn ratio(numerator: u32, denominator: u32) -> Fixed {
    if denominator == 0 {
        return Fixed::ONE;
    }
    Fixed::from_num(numerator) / Fixed::from_num(denominator)
}

/// Multiply an integer by a fixed-point factor and round up.
#[must_use]
pub fn mul_ceil(value: u32, factor: Fixed) -> u32 {
    let product = Fixed::from_num(value) * factor;
    product.ceil().saturating_to_num::<u32>()
}

/// `numerator / denominator` rounded to the nearest integer, with an exact
/// half going down (5 / 2 is 2, 7 / 4 is 2, 13 / 4 is 3).
///
/// A zero denominator returns the numerator.
#[must_use]
pub const fn div_round_half_down(numerator: u32, denominator: u32) -> u32 {
    if denominator == 0 {
        return numerator;
    }
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if remainder * 2 > denominator {
        quotient + 1
    } else {
        quotient
    }
}
