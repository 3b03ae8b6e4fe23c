mod analyze_query;
mod generate_response;
mod shopping_assistant;

pub use analyze_query::*;
pub use generate_response::*;
pub use shopping_assistant::*;
