//! # Domain Layer
//!
//! Shopping assistant models and the error type shared by every layer.
//! Independent of HTTP, CLI and vendor APIs.

mod error;
pub mod models;

pub use error::*;
pub use models::*;
