//! Shared types for building exchange orders.
//!
//! Covers asset class selectors, the asset identity codec, the order model,
//! salts and signatures. Everything here is pure and free of I/O.

pub mod asset;
pub mod common;
pub mod errors;
pub mod order;
pub mod salt;
pub mod signature;
pub mod validation;

pub use asset::*;
pub use common::*;
pub use errors::*;
pub use order::*;
pub use salt::*;
pub use signature::*;
pub use validation::*;
