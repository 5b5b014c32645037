//! Log output for the exchange client.
//!
//! The other crates only emit `tracing` events; a binary calls
//! [`init_tracing`] once at startup to decide where they go.

pub mod tracing;

pub use crate::tracing::{init_tracing, TracingConfig};
