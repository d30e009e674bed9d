//! Decay curve, evaluation context and block-decay configuration types.
//!
//! Amounts are 256-bit unsigned integers, matching the settlement contract.
//! Block heights and relative offsets are u64.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_CURVE_POINTS;
use crate::error::DecayError;

/// A piecewise-linear decay curve of at most [`MAX_CURVE_POINTS`] control points.
///
/// Each control point pairs a block offset (relative to the decay start) with
/// the cumulative amount subtracted from the start amount once that offset is
/// reached. Offsets are expected to be ascending but are never sorted here:
/// evaluation replicates the contract for malformed curves too.
///
/// The only way to obtain a curve is [`DecayCurve::new`] (or deserialization,
/// which runs the same checks), so the length invariants hold for every value.
///
/// # Examples
///
/// ```
/// use taper_core::types::DecayCurve;
/// use taper_core::U256;
///
/// let curve = DecayCurve::new(&[50, 150], &[U256::from(5), U256::from(20)]).unwrap();
/// assert_eq!(curve.len(), 2);
/// assert_eq!(curve.last_point(), Some((150, U256::from(20))));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CurvePoints", into = "CurvePoints")]
pub struct DecayCurve {
    relative_blocks: [u64; MAX_CURVE_POINTS],
    relative_amounts: [U256; MAX_CURVE_POINTS],
    len: usize,
}

impl DecayCurve {
    /// A curve with no control points. Evaluates to the start amount everywhere.
    pub const EMPTY: Self = Self {
        relative_blocks: [0; MAX_CURVE_POINTS],
        relative_amounts: [U256::ZERO; MAX_CURVE_POINTS],
        len: 0,
    };

    /// Build a curve from positionally paired offsets and amounts.
    ///
    /// The amount count is checked against the capacity first, as the contract
    /// does, then the two sequences are checked for equal length.
    pub fn new(relative_blocks: &[u64], relative_amounts: &[U256]) -> Result<Self, DecayError> {
        if relative_amounts.len() > MAX_CURVE_POINTS {
            return Err(DecayError::InvalidDecayCurve {
                points: relative_amounts.len(),
            });
        }
        if relative_blocks.len() != relative_amounts.len() {
            return Err(DecayError::CurveLengthMismatch {
                blocks: relative_blocks.len(),
                amounts: relative_amounts.len(),
            });
        }

        let mut curve = Self::EMPTY;
        let len = relative_amounts.len();
        curve.relative_blocks[..len].copy_from_slice(relative_blocks);
        curve.relative_amounts[..len].copy_from_slice(relative_amounts);
        curve.len = len;
        Ok(curve)
    }

    /// Number of control points.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the curve has no control points.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Block offsets of the control points, in stored order.
    pub fn relative_blocks(&self) -> &[u64] {
        &self.relative_blocks[..self.len]
    }

    /// Cumulative decay amounts of the control points, in stored order.
    pub fn relative_amounts(&self) -> &[U256] {
        &self.relative_amounts[..self.len]
    }

    /// Control point `index` as `(relative_block, relative_amount)`.
    pub fn point(&self, index: usize) -> Option<(u64, U256)> {
        (index < self.len).then(|| (self.relative_blocks[index], self.relative_amounts[index]))
    }

    /// The final control point, past which the curve is flat.
    pub fn last_point(&self) -> Option<(u64, U256)> {
        self.len.checked_sub(1).and_then(|i| self.point(i))
    }

    /// Iterate over `(relative_block, relative_amount)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (u64, U256)> + '_ {
        self.relative_blocks()
            .iter()
            .copied()
            .zip(self.relative_amounts().iter().copied())
    }

    /// Whether offsets are strictly ascending.
    ///
    /// Evaluation does not require this; callers use it to flag curves whose
    /// result follows the scan rule rather than the intended auction shape.
    pub fn is_ascending(&self) -> bool {
        self.relative_blocks().windows(2).all(|w| w[0] < w[1])
    }

    /// Absolute amount at control point `index`: `start_amount - relative_amounts[index]`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn amount_at(&self, index: usize, start_amount: U256) -> Result<U256, DecayError> {
        let relative_amount = self.relative_amounts()[index];
        start_amount
            .checked_sub(relative_amount)
            .ok_or(DecayError::AmountUnderflow {
                start_amount,
                relative_amount,
            })
    }

    /// Amount once decay has fully elapsed: the value at the last control point.
    ///
    /// An empty curve never decays, so the start amount is returned.
    pub fn end_amount(&self, start_amount: U256) -> Result<U256, DecayError> {
        match self.len.checked_sub(1) {
            Some(last) => self.amount_at(last, start_amount),
            None => Ok(start_amount),
        }
    }
}

impl Default for DecayCurve {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Serialized form of a [`DecayCurve`]: two parallel sequences.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurvePoints {
    pub relative_blocks: Vec<u64>,
    pub relative_amounts: Vec<U256>,
}

impl TryFrom<CurvePoints> for DecayCurve {
    type Error = DecayError;

    fn try_from(points: CurvePoints) -> Result<Self, Self::Error> {
        Self::new(&points.relative_blocks, &points.relative_amounts)
    }
}

impl From<DecayCurve> for CurvePoints {
    fn from(curve: DecayCurve) -> Self {
        Self {
            relative_blocks: curve.relative_blocks().to_vec(),
            relative_amounts: curve.relative_amounts().to_vec(),
        }
    }
}

/// Parameters of a single evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecayContext {
    /// Absolute block at which decay begins.
    pub decay_start_block: u64,
    /// Amount at or before `decay_start_block`.
    pub start_amount: U256,
    pub curve: DecayCurve,
    /// Absolute block being queried.
    pub current_block: u64,
}

impl DecayContext {
    /// Blocks elapsed since decay start, or `None` if decay has not begun.
    pub fn block_delta(&self) -> Option<u64> {
        (self.current_block > self.decay_start_block)
            .then(|| self.current_block - self.decay_start_block)
    }
}

/// A block-decay configuration as carried by an order's input or output.
///
/// # Examples
///
/// ```
/// use taper_core::types::BlockDecayConfig;
///
/// let config: BlockDecayConfig = serde_json::from_str(r#"{
///     "decayStartBlock": 0,
///     "startAmount": "0x3e8",
///     "relativeBlocks": [100],
///     "relativeAmounts": ["0xa"]
/// }"#).unwrap();
/// assert_eq!(config.curve().unwrap().len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDecayConfig {
    pub decay_start_block: u64,
    pub start_amount: U256,
    pub relative_blocks: Vec<u64>,
    pub relative_amounts: Vec<U256>,
}

impl BlockDecayConfig {
    /// Validate and build the curve described by this config.
    pub fn curve(&self) -> Result<DecayCurve, DecayError> {
        DecayCurve::new(&self.relative_blocks, &self.relative_amounts)
    }

    /// Evaluation context for `current_block`.
    pub fn context(&self, current_block: u64) -> Result<DecayContext, DecayError> {
        Ok(DecayContext {
            decay_start_block: self.decay_start_block,
            start_amount: self.start_amount,
            curve: self.curve()?,
            current_block,
        })
    }

    /// Absolute block of the last control point, where decay stops.
    ///
    /// `None` for an empty curve.
    pub fn decay_end_block(&self) -> Option<u64> {
        self.relative_blocks
            .last()
            .map(|offset| self.decay_start_block.saturating_add(*offset))
    }
}

/// A [`BlockDecayConfig`] whose fields may be absent.
///
/// Only `start_amount` and `relative_amounts` are needed to compute the fully
/// decayed amount.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialBlockDecayConfig {
    pub decay_start_block: Option<u64>,
    pub start_amount: Option<U256>,
    pub relative_blocks: Option<Vec<u64>>,
    pub relative_amounts: Option<Vec<U256>>,
}

impl From<BlockDecayConfig> for PartialBlockDecayConfig {
    fn from(config: BlockDecayConfig) -> Self {
        Self {
            decay_start_block: Some(config.decay_start_block),
            start_amount: Some(config.start_amount),
            relative_blocks: Some(config.relative_blocks),
            relative_amounts: Some(config.relative_amounts),
        }
    }
}

impl TryFrom<PartialBlockDecayConfig> for BlockDecayConfig {
    type Error = DecayError;

    fn try_from(partial: PartialBlockDecayConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            decay_start_block: partial
                .decay_start_block
                .ok_or(DecayError::MissingConfiguration("decayStartBlock"))?,
            start_amount: partial
                .start_amount
                .ok_or(DecayError::MissingConfiguration("startAmount"))?,
            relative_blocks: partial
                .relative_blocks
                .ok_or(DecayError::MissingConfiguration("relativeBlocks"))?,
            relative_amounts: partial
                .relative_amounts
                .ok_or(DecayError::MissingConfiguration("relativeAmounts"))?,
        })
    }
}
