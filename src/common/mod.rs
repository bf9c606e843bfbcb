//! Common types and error definitions for the Reeds-Shepp engine
//!
//! This module provides the foundational building blocks shared by the
//! frame normalizer, the word catalog, the selector, and the sampler.

pub mod types;
pub mod error;

pub use types::*;
pub use error::*;
