//! Block-decay configuration helpers.
//!
//! Thin call sites over [`NonlinearDecayEngine`] for the questions callers
//! actually ask of an order: what is it worth at block B, what is it worth once
//! decay is over, and how does it move across a range of blocks.

use alloy_primitives::U256;
use taper_core::constants::{MAX_CURVE_POINTS, MAX_SCHEDULE_ROWS};
use taper_core::error::DecayError;
use taper_core::traits::CurveEvaluator;
use taper_core::types::{BlockDecayConfig, DecayContext, PartialBlockDecayConfig};
use tracing::debug;

use crate::engine::NonlinearDecayEngine;

/// Decayed amount of `config` at `block`.
///
/// # Examples
///
/// ```
/// use taper_core::types::BlockDecayConfig;
/// use taper_core::U256;
/// use taper_decay::evaluate_at;
///
/// let config = BlockDecayConfig {
///     decay_start_block: 0,
///     start_amount: U256::from(1000),
///     relative_blocks: vec![100],
///     relative_amounts: vec![U256::from(10)],
/// };
/// assert_eq!(evaluate_at(&config, 50).unwrap(), U256::from(995));
/// ```
pub fn evaluate_at(config: &BlockDecayConfig, block: u64) -> Result<U256, DecayError> {
    let ctx = config.context(block)?;
    NonlinearDecayEngine::new().evaluate(&ctx)
}

/// Amount once decay has fully elapsed: `start_amount - relative_amounts[last]`.
///
/// Needs no block number. Fails with [`DecayError::MissingConfiguration`] when
/// `start_amount` or `relative_amounts` is absent. An empty amount list means
/// the curve never decays and the start amount is returned.
pub fn evaluate_at_full_decay(config: &PartialBlockDecayConfig) -> Result<U256, DecayError> {
    let start_amount = config
        .start_amount
        .ok_or(DecayError::MissingConfiguration("startAmount"))?;
    let relative_amounts = config
        .relative_amounts
        .as_deref()
        .ok_or(DecayError::MissingConfiguration("relativeAmounts"))?;

    if relative_amounts.len() > MAX_CURVE_POINTS {
        return Err(DecayError::InvalidDecayCurve {
            points: relative_amounts.len(),
        });
    }

    match relative_amounts.last() {
        Some(relative_amount) => {
            start_amount
                .checked_sub(*relative_amount)
                .ok_or(DecayError::AmountUnderflow {
                    start_amount,
                    relative_amount: *relative_amount,
                })
        }
        None => Ok(start_amount),
    }
}

/// Evaluate `config` from `from_block` to `to_block` inclusive, every `step` blocks.
///
/// The final row is always `to_block`, even when the step does not land on it.
/// The curve is validated once up front.
pub fn decay_schedule(
    config: &BlockDecayConfig,
    from_block: u64,
    to_block: u64,
    step: u64,
) -> Result<Vec<(u64, U256)>, DecayError> {
    if step == 0 {
        return Err(DecayError::InvalidSchedule("step must be positive".to_string()));
    }
    if from_block > to_block {
        return Err(DecayError::InvalidSchedule(format!(
            "from block {from_block} is after to block {to_block}"
        )));
    }
    let rows = (to_block - from_block).div_ceil(step).saturating_add(1);
    if rows > MAX_SCHEDULE_ROWS {
        return Err(DecayError::InvalidSchedule(format!(
            "{rows} rows exceeds the maximum of {MAX_SCHEDULE_ROWS}"
        )));
    }

    let engine = NonlinearDecayEngine::new();
    let base = config.context(from_block)?;
    debug!(from_block, to_block, step, rows, "building decay schedule");

    let mut schedule = Vec::with_capacity(rows as usize);
    let mut block = from_block;
    loop {
        let ctx = DecayContext {
            current_block: block,
            ..base
        };
        schedule.push((block, engine.evaluate(&ctx)?));
        if block == to_block {
            break;
        }
        block = block.saturating_add(step).min(to_block);
    }
    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u(v: u64) -> U256 {
        U256::from(v)
    }

    fn config(start_block: u64, start: u64, blocks: &[u64], amounts: &[u64]) -> BlockDecayConfig {
        BlockDecayConfig {
            decay_start_block: start_block,
            start_amount: u(start),
            relative_blocks: blocks.to_vec(),
            relative_amounts: amounts.iter().map(|a| u(*a)).collect(),
        }
    }

    // --- evaluate_at ---

    #[test]
    fn evaluate_at_single_segment() {
        let c = config(0, 1000, &[100], &[10]);
        assert_eq!(evaluate_at(&c, 0).unwrap(), u(1000));
        assert_eq!(evaluate_at(&c, 50).unwrap(), u(995));
        assert_eq!(evaluate_at(&c, 200).unwrap(), u(990));
    }

    #[test]
    fn evaluate_at_rejects_oversized_curve() {
        let blocks: Vec<u64> = (1..=17).collect();
        let c = config(0, 1000, &blocks, &blocks);
        assert_eq!(
            evaluate_at(&c, 5).unwrap_err(),
            DecayError::InvalidDecayCurve { points: 17 }
        );
    }

    #[test]
    fn evaluate_at_rejects_mismatched_lengths() {
        let c = config(0, 1000, &[1, 2], &[1]);
        assert_eq!(
            evaluate_at(&c, 5).unwrap_err(),
            DecayError::CurveLengthMismatch {
                blocks: 2,
                amounts: 1
            }
        );
    }

    // --- evaluate_at_full_decay ---

    #[test]
    fn full_decay_subtracts_last_amount() {
        let c = config(0, 500, &[50, 150], &[5, 20]);
        assert_eq!(evaluate_at_full_decay(&c.into()).unwrap(), u(480));
    }

    #[test]
    fn full_decay_needs_no_blocks() {
        let partial = PartialBlockDecayConfig {
            start_amount: Some(u(500)),
            relative_amounts: Some(vec![u(5), u(20)]),
            ..Default::default()
        };
        assert_eq!(evaluate_at_full_decay(&partial).unwrap(), u(480));
    }

    #[test]
    fn full_decay_missing_start_amount() {
        let partial = PartialBlockDecayConfig {
            relative_amounts: Some(vec![u(5)]),
            ..Default::default()
        };
        assert_eq!(
            evaluate_at_full_decay(&partial).unwrap_err(),
            DecayError::MissingConfiguration("startAmount")
        );
    }

    #[test]
    fn full_decay_missing_relative_amounts() {
        let partial = PartialBlockDecayConfig {
            start_amount: Some(u(5)),
            ..Default::default()
        };
        assert_eq!(
            evaluate_at_full_decay(&partial).unwrap_err(),
            DecayError::MissingConfiguration("relativeAmounts")
        );
    }

    #[test]
    fn full_decay_empty_amounts_is_start() {
        let partial = PartialBlockDecayConfig {
            start_amount: Some(u(5)),
            relative_amounts: Some(Vec::new()),
            ..Default::default()
        };
        assert_eq!(evaluate_at_full_decay(&partial).unwrap(), u(5));
    }

    #[test]
    fn full_decay_rejects_oversized_curve() {
        let partial = PartialBlockDecayConfig {
            start_amount: Some(u(1000)),
            relative_amounts: Some(vec![u(1); 17]),
            ..Default::default()
        };
        assert_eq!(
            evaluate_at_full_decay(&partial).unwrap_err(),
            DecayError::InvalidDecayCurve { points: 17 }
        );
    }

    #[test]
    fn full_decay_underflow() {
        let c = config(0, 10, &[5], &[11]);
        assert!(matches!(
            evaluate_at_full_decay(&c.into()),
            Err(DecayError::AmountUnderflow { .. })
        ));
    }

    // --- decay_schedule ---

    #[test]
    fn schedule_includes_both_ends() {
        let c = config(0, 1000, &[100], &[10]);
        let rows = decay_schedule(&c, 0, 100, 25).unwrap();
        assert_eq!(
            rows,
            vec![
                (0, u(1000)),
                (25, u(998)),
                (50, u(995)),
                (75, u(993)),
                (100, u(990)),
            ]
        );
    }

    #[test]
    fn schedule_clamps_last_step_to_end() {
        let c = config(0, 1000, &[100], &[10]);
        let rows = decay_schedule(&c, 0, 10, 4).unwrap();
        let blocks: Vec<u64> = rows.iter().map(|(b, _)| *b).collect();
        assert_eq!(blocks, vec![0, 4, 8, 10]);
    }

    #[test]
    fn schedule_single_block() {
        let c = config(0, 1000, &[100], &[10]);
        assert_eq!(decay_schedule(&c, 50, 50, 1).unwrap(), vec![(50, u(995))]);
    }

    #[test]
    fn schedule_matches_evaluate_at() {
        let c = config(1_000, 500, &[50, 150], &[5, 20]);
        for (block, amount) in decay_schedule(&c, 990, 1_200, 7).unwrap() {
            assert_eq!(amount, evaluate_at(&c, block).unwrap());
        }
    }

    #[test]
    fn schedule_rejects_zero_step() {
        let c = config(0, 1000, &[100], &[10]);
        assert!(matches!(
            decay_schedule(&c, 0, 10, 0),
            Err(DecayError::InvalidSchedule(_))
        ));
    }

    #[test]
    fn schedule_rejects_reversed_range() {
        let c = config(0, 1000, &[100], &[10]);
        assert!(matches!(
            decay_schedule(&c, 10, 0, 1),
            Err(DecayError::InvalidSchedule(_))
        ));
    }

    #[test]
    fn schedule_rejects_too_many_rows() {
        let c = config(0, 1000, &[100], &[10]);
        assert!(matches!(
            decay_schedule(&c, 0, u64::MAX, 1),
            Err(DecayError::InvalidSchedule(_))
        ));
    }

    #[test]
    fn schedule_validates_curve() {
        let c = config(0, 1000, &[1, 2], &[1]);
        assert!(matches!(
            decay_schedule(&c, 0, 10, 1),
            Err(DecayError::CurveLengthMismatch { .. })
        ));
    }
}
