//! # Application Layer
//!
//! Use cases and the interfaces they depend on. Adapters live in the
//! connector layer.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
