// stagehand/src/pipeline/definition.rs

//! Contains the `Pipeline<TData>` struct definition and the methods that
//! define its stages.

use crate::core::context_data::ContextData;
use crate::core::control::StageStatus;
use crate::core::stage::{Action, Stage};
use crate::error::{StagehandError, StagehandResult};
use crate::pipeline::hooks::{AfterStageHook, BeforeStageHook};
use std::future::Future;
use tracing::{event, Level};

/// An ordered, append-only list of stages run sequentially against a shared
/// `ContextData<TData>`.
///
/// `TData` must be `'static + Send + Sync`.
pub struct Pipeline<TData>
where
  TData: 'static + Send + Sync,
{
  /// Stages in execution order. Order is fixed once a stage is added.
  pub(crate) stages: Vec<Stage<TData>>,

  pub(crate) before_each: Vec<BeforeStageHook>,
  pub(crate) after_each: Vec<AfterStageHook>,
}

impl<TData> Pipeline<TData>
where
  TData: 'static + Send + Sync,
{
  /// Creates an empty pipeline. Running it succeeds trivially.
  pub fn new() -> Self {
    Self {
      stages: Vec::new(),
      before_each: Vec::new(),
      after_each: Vec::new(),
    }
  }

  /// Appends a stage.
  ///
  /// The `action` takes `ContextData<TData>` and returns a `Future` resolving to
  /// `Result<S, UserErr>`. `S` is anything convertible into `StageStatus`
  /// (so a plain `bool` works), and `UserErr` must convert into `StagehandError`
  /// (`anyhow::Error` does).
  ///
  /// Returns `StagehandError::DuplicateStage` if a stage with the same name exists.
  pub fn add_stage<F, S, UserErr>(
    &mut self,
    name: impl Into<String>,
    failure_message: impl Into<String>,
    action: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static,
  ) -> StagehandResult<&mut Self>
  where
    F: Future<Output = Result<S, UserErr>> + Send + 'static,
    S: Into<StageStatus> + Send + 'static,
    UserErr: Into<StagehandError> + Send + 'static,
  {
    let name: String = name.into();
    if self.stages.iter().any(|s| s.name == name) {
      return Err(StagehandError::DuplicateStage { stage_name: name });
    }

    let boxed: Action<TData> = Box::new(move |ctx_data| {
      let user_fut = action(ctx_data);
      Box::pin(async move { user_fut.await.map(Into::into).map_err(Into::into) })
    });

    event!(Level::DEBUG, stage_name = %name, position = self.stages.len(), "Stage added.");
    self.stages.push(Stage {
      name,
      failure_message: failure_message.into(),
      action: boxed,
    });
    Ok(self)
  }

  pub fn len(&self) -> usize {
    self.stages.len()
  }

  pub fn is_empty(&self) -> bool {
    self.stages.is_empty()
  }

  pub fn stages(&self) -> &[Stage<TData>] {
    &self.stages
  }

  pub fn stage_names(&self) -> impl Iterator<Item = &str> {
    self.stages.iter().map(|s| s.name.as_str())
  }
}

impl<TData> Default for Pipeline<TData>
where
  TData: 'static + Send + Sync,
{
  fn default() -> Self {
    Self::new()
  }
}

impl<TData> std::fmt::Debug for Pipeline<TData>
where
  TData: 'static + Send + Sync,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Pipeline")
      .field("stages", &self.stages)
      .field("before_each_hooks", &self.before_each.len())
      .field("after_each_hooks", &self.after_each.len())
      .finish()
  }
}
