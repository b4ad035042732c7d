// stagehand/src/core/stage.rs

//! Defines a single stage of a pipeline: a name, an action, and the message
//! reported when the action fails.

use crate::core::context_data::ContextData;
use crate::core::control::StageStatus;
use crate::error::StagehandError;
use std::future::Future;
use std::pin::Pin;

/// Type alias for a stage action.
///
/// An action is an asynchronous function that receives a clone of the run's
/// `ContextData<TData>` and resolves to the stage's status. Actions perform
/// their own side effects (usually by running an external command) and are
/// responsible for dropping any lock guard before an `.await`.
pub type Action<TData> = Box<
  dyn Fn(ContextData<TData>) -> Pin<Box<dyn Future<Output = Result<StageStatus, StagehandError>> + Send>>
    + Send
    + Sync,
>;

/// Definition of a pipeline stage. Immutable once added to a pipeline.
pub struct Stage<TData: 'static + Send + Sync> {
  pub(crate) name: String,
  pub(crate) failure_message: String,
  pub(crate) action: Action<TData>,
}

impl<TData: 'static + Send + Sync> Stage<TData> {
  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn failure_message(&self) -> &str {
    &self.failure_message
  }
}

// Action is a boxed closure and has no Debug of its own.
impl<TData: 'static + Send + Sync> std::fmt::Debug for Stage<TData> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Stage")
      .field("name", &self.name)
      .field("failure_message", &self.failure_message)
      .finish_non_exhaustive()
  }
}
