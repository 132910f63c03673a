//! HTTP/REST API layer for Edulearn.
//!
//! Axum-based JSON API under `/api/`, with optional API key authentication
//! and CORS support. Error bodies are `{"error": "<message>"}`.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
