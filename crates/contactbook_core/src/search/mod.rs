//! Search entry points.
//!
//! # Responsibility
//! - Match contacts against user query text.
//!
//! # Invariants
//! - Results keep collection order.
//! - Matching is recomputed on every call; there is no cursor state.

pub mod name;
