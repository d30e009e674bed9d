//! Control point location within a decay curve.

use taper_core::types::DecayCurve;

/// Find the segment `(prev, next)` enclosing `block_delta`.
///
/// Scans relative blocks from low to high index. The first index whose offset
/// is `>= block_delta` becomes `next` and `prev` is the index visited before it
/// (0 when `next == 0`). When every offset is below `block_delta` the query is
/// past the end of the curve and `(last, last)` is returned, so evaluation
/// clamps to the final control point.
///
/// The scan never assumes sorted offsets: for a non-ascending curve the first
/// match still wins.
///
/// Callers must not pass an empty curve; it yields `(0, 0)`, which does not
/// index a control point.
///
/// # Examples
///
/// ```
/// use taper_core::types::DecayCurve;
/// use taper_core::U256;
/// use taper_decay::locate_array_position;
///
/// let curve = DecayCurve::new(&[50, 150], &[U256::from(5), U256::from(20)]).unwrap();
/// assert_eq!(locate_array_position(&curve, 100), (0, 1));
/// assert_eq!(locate_array_position(&curve, 500), (1, 1));
/// ```
pub fn locate_array_position(curve: &DecayCurve, block_delta: u64) -> (usize, usize) {
    let relative_blocks = curve.relative_blocks();
    let mut prev = 0;
    for (next, offset) in relative_blocks.iter().enumerate() {
        if *offset >= block_delta {
            return (prev, next);
        }
        prev = next;
    }
    let last = relative_blocks.len().saturating_sub(1);
    (last, last)
}
