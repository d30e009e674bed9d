//! # taper-decay: nonlinear block-decay engine.
//!
//! All calculations use unsigned integer arithmetic only, mirroring the
//! settlement contract bit for bit.
//!
//! - **Point location**: a low-to-high scan finds the curve segment that
//!   encloses the elapsed block count, clamping to the last control point.
//! - **Linear decay**: interpolation within a segment using truncating
//!   division, with the subtraction ordered so operands never go negative.
//! - **Wrappers**: evaluate a [`BlockDecayConfig`](taper_core::types::BlockDecayConfig)
//!   at a block, once fully decayed, or over a block range.

pub mod block_decay;
pub mod engine;
pub mod linear;
pub mod locate;

pub use block_decay::{decay_schedule, evaluate_at, evaluate_at_full_decay};
pub use engine::NonlinearDecayEngine;
pub use linear::linear_decay;
pub use locate::locate_array_position;
