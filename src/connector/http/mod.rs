//! HTTP API exposing the assistant to storefront clients.

mod error;
mod server;

pub use error::ApiError;
pub use server::*;
