//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Chat completion (OpenAI-compatible HTTP API, scripted mock)
//! - Product catalog (JSON file)
//! - Delivery surfaces (CLI controllers, HTTP API)

pub mod adapter;
pub mod api;
pub mod http;

pub use adapter::*;
