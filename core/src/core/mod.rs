pub mod context_data;
pub mod control;
pub mod stage;

pub use context_data::ContextData;
pub use control::{FailureCause, RunOutcome, StageFailure, StageStatus};
pub use stage::{Action, Stage};
