//! # taper-core
//! Foundation types and traits for evaluating block-decaying auction amounts.

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

pub use alloy_primitives::U256;
