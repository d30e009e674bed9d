//! Linear interpolation within a single curve segment.
//!
//! Integer arithmetic only. The product `|end - start| * elapsed` is formed at
//! 512 bits so it cannot overflow before the truncating division, which
//! matches a `mulDivDown` over 256-bit unsigned integers.

use alloy_primitives::{U256, U512};

/// Amount at `current_point` on the segment from `(start_point, start_amount)`
/// to `(end_point, end_amount)`.
///
/// - At or past `end_point` the end amount is returned exactly; there is no
///   extrapolation.
/// - Decreasing segments compute `start - (start - end) * elapsed / duration`.
/// - Increasing (or flat) segments compute `start + (end - start) * elapsed / duration`.
///
/// Both branches subtract the smaller amount from the larger, so no operand is
/// ever negative, and both truncate the division. For a decreasing segment the
/// result therefore rounds up toward `start_amount`, for an increasing one it
/// rounds down toward `start_amount`.
///
/// Requires `start_point <= current_point`.
///
/// # Examples
///
/// ```
/// use taper_core::U256;
/// use taper_decay::linear_decay;
///
/// let amount = linear_decay(0, 100, 50, U256::from(1000), U256::from(990));
/// assert_eq!(amount, U256::from(995));
/// ```
pub fn linear_decay(
    start_point: u64,
    end_point: u64,
    current_point: u64,
    start_amount: U256,
    end_amount: U256,
) -> U256 {
    if current_point >= end_point {
        return end_amount;
    }
    debug_assert!(start_point <= current_point, "current point before segment start");

    let elapsed = current_point - start_point;
    let duration = end_point - start_point;

    if end_amount < start_amount {
        start_amount - mul_div_down(start_amount - end_amount, elapsed, duration)
    } else {
        start_amount + mul_div_down(end_amount - start_amount, elapsed, duration)
    }
}

/// `amount * numerator / denominator`, truncated, with a 512-bit intermediate.
///
/// Only called with `numerator < denominator`, so the quotient is below
/// `amount` and fits back into 256 bits.
fn mul_div_down(amount: U256, numerator: u64, denominator: u64) -> U256 {
    let product = amount.widening_mul::<256, 4, 512, 8>(U256::from(numerator));
    narrow(product / U512::from(denominator))
}

/// Truncate a 512-bit value known to fit into 256 bits.
fn narrow(wide: U512) -> U256 {
    let limbs = wide.as_limbs();
    debug_assert!(limbs[4..].iter().all(|limb| *limb == 0), "quotient exceeds 256 bits");
    U256::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3]])
}
