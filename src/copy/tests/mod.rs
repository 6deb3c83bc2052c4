//! Structural copy tests.
//!
//! Tests verify that:
//! - Each shape pair picks the right strategy
//! - Unconvertible units are dropped, never partially written
//! - Invalid destinations are left untouched

pub(crate) mod common;

mod record;
mod scalar;
mod sequence;
