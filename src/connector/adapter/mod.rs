mod groq_chat_client;
mod json_product_catalog;
mod mock_chat_client;

pub use groq_chat_client::*;
pub use json_product_catalog::*;
pub use mock_chat_client::*;
