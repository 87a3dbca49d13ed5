pub mod app;
pub mod interaction;
pub mod output;
pub mod prompts;
pub mod runner;
pub mod scripted;

pub use app::run_cli;
