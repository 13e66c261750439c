//! Domain model for the contact directory.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//!
//! # Invariants
//! - Every contact is identified by a stable `ContactId`.
//! - Deletion is a hard removal; there are no tombstones.

pub mod contact;
