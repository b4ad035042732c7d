// src/lib.rs

//! Stagehand: a small, sequential, fail-fast stage pipeline for Rust.
//!
//! A pipeline is an ordered list of named stages. Each stage has an async
//! action and a failure message. Running the pipeline:
//!  - Invokes each stage's action in declared order, one at a time.
//!  - Halts at the first stage that reports failure or returns an error.
//!    Later stages are never invoked and nothing is rolled back.
//!  - Reports `RunOutcome::Succeeded` or `RunOutcome::FailedAt(StageFailure)`.
//!
//! Stages reach the outside world through the `CommandRunner` capability
//! (`SystemRunner` spawns real processes), which keeps pipeline logic
//! testable with fakes.

pub mod core;
pub mod error;
pub mod pipeline;
pub mod process;

// --- Re-exports for the Public API ---

pub use crate::core::context_data::ContextData;
pub use crate::core::control::{FailureCause, RunOutcome, StageFailure, StageStatus};
pub use crate::core::stage::{Action, Stage};

pub use crate::pipeline::definition::Pipeline;
pub use crate::pipeline::run::{PipelineRun, RunState, StageHeader, StageRecord};

pub use crate::process::{CommandOutput, CommandRunner, CommandSpec, OutputMode, SystemRunner};

pub use crate::error::{StagehandError, StagehandResult};

/*
    Typical use:
    1. Define a context struct `MyCtx` holding whatever stages hand to each other.
    2. Create a `Pipeline<MyCtx>` and append stages with `.add_stage(name, failure_message, action)`.
       Actions get a `ContextData<MyCtx>` and return `Result<StageStatus | bool, E>`.
    3. Optionally attach `.before_each()` / `.after_each()` observers for progress output.
    4. `pipeline.run(ContextData::new(ctx)).await` and match on the `RunOutcome`.
*/
