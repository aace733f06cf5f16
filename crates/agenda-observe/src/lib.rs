//! Observability helpers for Agenda driver code.

pub mod tracing_setup;
