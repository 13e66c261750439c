//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into use-case level APIs.
//! - Keep UI/CLI adapters decoupled from storage details.

pub mod directory;
