//! Testing infrastructure for eventy integration tests.
//!
//! - `TestWorld`: isolated data directory and journal, runs the real binary
//! - `fixtures`: record builders
//! - `assertions`: checks over CLI output and exported JSON

pub mod assertions;
pub mod fixtures;
pub mod world;

pub use fixtures::RecordBuilder;
pub use world::{CliResult, TestWorld};
