//! scl90-core
//!
//! Pure domain types for SCL-90-R evaluations. No scoring tables, no
//! rendering: this is the shared vocabulary of the scorer.

pub mod error;
pub mod models;

/// Number of items on the SCL-90-R inventory.
pub const ITEM_COUNT: usize = 90;
