//! Cross-crate scenario and property tests for Taper.
//!
//! The tests in `tests/` exercise the public surface of taper-core and
//! taper-decay together, the way an order-building or filling service would.

pub mod helpers;
