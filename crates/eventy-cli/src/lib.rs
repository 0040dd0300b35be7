mod args;
mod commands;
pub mod config;
pub mod console;
pub mod types;

pub use args::Cli;
pub use commands::{build_query, run};
