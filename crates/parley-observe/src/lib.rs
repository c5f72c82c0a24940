//! Observability setup for Parley.
//!
//! Structured logging via tracing-subscriber, with optional OpenTelemetry
//! span export for development.

pub mod tracing_setup;
