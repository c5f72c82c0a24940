//! HTTP layer for Parley.
//!
//! Axum-based API with CORS, request tracing, and a header-derived identity
//! extractor. The wire format is deliberately plain: `POST /chat` returns
//! `{"reply": ...}`, `GET /history` returns a bare array.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
