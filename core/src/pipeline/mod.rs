// stagehand/src/pipeline/mod.rs

//! Defines the `Pipeline<TData>` struct, its construction, observer hooks and
//! fail-fast execution.

pub mod definition;
pub mod execution;
pub mod hooks;
pub mod run;

pub use definition::Pipeline;
pub use run::{PipelineRun, RunState, StageHeader, StageRecord};
