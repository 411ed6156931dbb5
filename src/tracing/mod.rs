//! Tracing and observability module.
//!
//! Provides logging setup for the catalog service.

/// Tracer configuration and initialization.
pub mod tracer;
