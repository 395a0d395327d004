//! Shared utilities for stockbot
//!
//! Logging setup and small helpers used by the `stockbot` crate and binary.

pub mod logging;

pub use logging::{init_tracing, init_tracing_with_default, redact_secret};
