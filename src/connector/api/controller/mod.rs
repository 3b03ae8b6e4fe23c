pub mod analyze_controller;
pub mod ask_controller;
pub mod input;
pub mod respond_controller;

pub use analyze_controller::AnalyzeController;
pub use ask_controller::AskController;
pub use respond_controller::RespondController;
