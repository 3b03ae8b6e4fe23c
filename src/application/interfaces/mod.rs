mod chat_client;
mod product_catalog;

pub use chat_client::*;
pub use product_catalog::*;
