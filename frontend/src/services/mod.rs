//! Remote services.
//!
//! # Services
//!
//! - [`analyzer`] - resume upload to the analyzer API

pub mod analyzer;

pub use analyzer::*;
