//! Business logic and port definitions for Parley.
//!
//! This crate defines the "ports" (the conversation store and LLM provider
//! traits) that the infrastructure layer implements, plus the two pieces of
//! the service with actual design in them: the context assembler and the
//! chat orchestration. It depends only on `parley-types` -- never on
//! `parley-infra` or any database/IO crate.

pub mod conversation;
pub mod llm;
