mod assistant_response;
mod completion;
mod conversation;
mod product;
mod shopping_intent;
mod stage_outcome;

pub use assistant_response::*;
pub use completion::*;
pub use conversation::*;
pub use product::*;
pub use shopping_intent::*;
pub use stage_outcome::*;
