//! Observability setup for Edulearn: structured logging with optional
//! OpenTelemetry span export.

pub mod tracing_setup;
