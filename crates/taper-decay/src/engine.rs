//! Decay engine implementing the [`CurveEvaluator`] trait.
//!
//! Evaluates a nonlinear decay curve at a block height the way the settlement
//! contract does: locate the enclosing segment, then interpolate linearly
//! within it using truncating unsigned division.

use alloy_primitives::U256;
use taper_core::constants::MAX_CURVE_POINTS;
use taper_core::error::DecayError;
use taper_core::traits::CurveEvaluator;
use taper_core::types::DecayCurve;
use tracing::trace;

use crate::linear::linear_decay;
use crate::locate::locate_array_position;

/// The production curve evaluator.
///
/// Stateless: a single instance can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonlinearDecayEngine;

impl NonlinearDecayEngine {
    /// Create a new NonlinearDecayEngine.
    pub fn new() -> Self {
        Self
    }
}

impl CurveEvaluator for NonlinearDecayEngine {
    fn decay(
        &self,
        curve: &DecayCurve,
        start_amount: U256,
        decay_start_block: u64,
        current_block: u64,
    ) -> Result<U256, DecayError> {
        // Capacity is enforced when the curve is built.
        debug_assert!(curve.len() <= MAX_CURVE_POINTS);

        // Decay has not begun, or there is nothing to decay.
        if decay_start_block >= current_block || curve.is_empty() {
            return Ok(start_amount);
        }

        let block_delta = current_block - decay_start_block;
        let relative_blocks = curve.relative_blocks();

        // Before the first control point the segment starts at (0, start_amount).
        if relative_blocks[0] > block_delta {
            let first_amount = curve.amount_at(0, start_amount)?;
            trace!(block_delta, end_point = relative_blocks[0], "interpolating before first point");
            return Ok(linear_decay(
                0,
                relative_blocks[0],
                block_delta,
                start_amount,
                first_amount,
            ));
        }

        let (prev, next) = locate_array_position(curve, block_delta);
        let last_amount = curve.amount_at(prev, start_amount)?;
        let next_amount = curve.amount_at(next, start_amount)?;
        trace!(block_delta, prev, next, "interpolating within segment");
        Ok(linear_decay(
            relative_blocks[prev],
            relative_blocks[next],
            block_delta,
            last_amount,
            next_amount,
        ))
    }
}
