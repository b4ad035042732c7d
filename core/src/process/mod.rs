// stagehand/src/process/mod.rs

//! External command execution behind a single capability trait, so stage
//! actions can be exercised with fakes instead of real processes.

pub mod command;
pub mod runner;

pub use command::{CommandOutput, CommandSpec, OutputMode};
pub use runner::{CommandRunner, SystemRunner};
