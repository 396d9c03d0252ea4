//! Observability setup for chatdock: log filtering and the tracing
//! subscriber, with optional OpenTelemetry export.

pub mod tracing_setup;
