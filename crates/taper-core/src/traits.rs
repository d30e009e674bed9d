//! Trait interfaces for decay evaluation.
//!
//! - [`CurveEvaluator`]: decay math engine (taper-decay implements)

use alloy_primitives::U256;

use crate::error::DecayError;
use crate::types::{DecayContext, DecayCurve};

/// Pure evaluation of a nonlinear block-decay curve.
///
/// Implementations must reproduce the settlement contract's unsigned integer
/// arithmetic exactly, including truncating division. Evaluation is stateless,
/// so a single evaluator can be shared across threads.
pub trait CurveEvaluator: Send + Sync {
    /// Decayed amount at `current_block` for a curve starting at `decay_start_block`.
    ///
    /// Returns `start_amount` unchanged when `current_block <= decay_start_block`
    /// or the curve is empty.
    fn decay(
        &self,
        curve: &DecayCurve,
        start_amount: U256,
        decay_start_block: u64,
        current_block: u64,
    ) -> Result<U256, DecayError>;

    /// Evaluate a prepared [`DecayContext`].
    ///
    /// Default implementation delegates to [`decay`](Self::decay).
    fn evaluate(&self, ctx: &DecayContext) -> Result<U256, DecayError> {
        self.decay(
            &ctx.curve,
            ctx.start_amount,
            ctx.decay_start_block,
            ctx.current_block,
        )
    }

    /// Amount once decay has fully elapsed, independent of block height.
    ///
    /// Default implementation: `start_amount - relative_amounts[last]`.
    fn full_decay_amount(&self, curve: &DecayCurve, start_amount: U256) -> Result<U256, DecayError> {
        curve.end_amount(start_amount)
    }
}
