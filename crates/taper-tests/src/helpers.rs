//! Shared test helpers for scenario and property tests.

use alloy_primitives::U256;
use taper_core::types::{BlockDecayConfig, DecayCurve};

/// Amounts from small integers.
pub fn amounts(values: &[u64]) -> Vec<U256> {
    values.iter().map(|v| U256::from(*v)).collect()
}

/// Build a block-decay config from small integers.
pub fn make_config(
    decay_start_block: u64,
    start_amount: u64,
    relative_blocks: &[u64],
    relative_amounts: &[u64],
) -> BlockDecayConfig {
    BlockDecayConfig {
        decay_start_block,
        start_amount: U256::from(start_amount),
        relative_blocks: relative_blocks.to_vec(),
        relative_amounts: amounts(relative_amounts),
    }
}

/// Build a curve from small integers, panicking on invalid input.
pub fn make_curve(relative_blocks: &[u64], relative_amounts: &[u64]) -> DecayCurve {
    DecayCurve::new(relative_blocks, &amounts(relative_amounts)).expect("valid test curve")
}

/// One whole token at 18 decimals.
pub fn ether(units: u64) -> U256 {
    U256::from(units) * U256::from(10u64).pow(U256::from(18))
}
