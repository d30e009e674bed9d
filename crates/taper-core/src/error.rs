//! Error types for decay evaluation.
use alloy_primitives::U256;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecayError {
    #[error("invalid decay curve: {points} points exceeds the maximum of 16")] InvalidDecayCurve { points: usize },
    #[error("curve length mismatch: {blocks} relative blocks, {amounts} relative amounts")] CurveLengthMismatch { blocks: usize, amounts: usize },
    #[error("missing configuration: {0}")] MissingConfiguration(&'static str),
    #[error("amount underflow: relative amount {relative_amount} exceeds start amount {start_amount}")] AmountUnderflow { start_amount: U256, relative_amount: U256 },
    #[error("invalid schedule: {0}")] InvalidSchedule(String),
}
