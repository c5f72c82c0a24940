//! Shared domain types for Parley.
//!
//! This crate contains the core domain types used across the Parley service:
//! Identity, Turn, LLM request/response shapes, configuration, and the error
//! taxonomy.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod error;
pub mod identity;
pub mod llm;
pub mod turn;
