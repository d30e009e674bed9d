//! Curve limits and defaults shared by every Taper crate.

/// Maximum number of control points a decay curve may carry.
///
/// Mirrors the settlement contract, which packs the relative blocks of a
/// curve into a single 256-bit word of sixteen `uint16` lanes.
///
/// # Examples
///
/// ```
/// use taper_core::constants::MAX_CURVE_POINTS;
/// assert_eq!(MAX_CURVE_POINTS, 16);
/// ```
pub const MAX_CURVE_POINTS: usize = 16;

/// Block step used by decay schedules when the caller does not pick one.
pub const DEFAULT_SCHEDULE_STEP: u64 = 1;

/// Upper bound on rows a single decay schedule may produce.
pub const MAX_SCHEDULE_ROWS: u64 = 100_000;
