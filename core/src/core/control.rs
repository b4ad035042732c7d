// stagehand/src/core/control.rs

//! Defines the signal a stage action returns and the outcome of a pipeline run.

use crate::error::StagehandError;
use thiserror::Error;

/// Signal from a stage action reporting how its unit of work went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
  /// The stage did its work; the pipeline moves on to the next stage.
  Succeeded,
  /// The stage reports failure without an error value.
  /// The pipeline halts and no later stage is invoked.
  Failed,
}

impl StageStatus {
  pub fn is_success(self) -> bool {
    matches!(self, StageStatus::Succeeded)
  }
}

impl From<bool> for StageStatus {
  fn from(ok: bool) -> Self {
    if ok {
      StageStatus::Succeeded
    } else {
      StageStatus::Failed
    }
  }
}

/// Why a stage counted as failed.
#[derive(Debug, Error)]
pub enum FailureCause {
  #[error("stage reported failure")]
  Reported,
  #[error(transparent)]
  Error(#[from] StagehandError),
}

/// The one failure kind a run can end with: which stage failed, and why.
#[derive(Debug, Error)]
#[error("{message} (stage '{stage_name}', position {stage_index}): {cause}")]
pub struct StageFailure {
  pub stage_index: usize,
  pub stage_name: String,
  /// The stage's human-readable failure message, e.g. "Shipping Failed".
  pub message: String,
  #[source]
  pub cause: FailureCause,
}

impl StageFailure {
  /// Exit status of the external command that failed the stage, if any.
  pub fn exit_code(&self) -> Option<i32> {
    match &self.cause {
      FailureCause::Reported => None,
      FailureCause::Error(err) => err.exit_code(),
    }
  }
}

/// Outcome of a full pipeline execution.
#[derive(Debug)]
pub enum RunOutcome {
  /// Every stage ran and succeeded (trivially true for an empty pipeline).
  Succeeded,
  /// The run halted at the first failing stage.
  FailedAt(StageFailure),
}

impl RunOutcome {
  pub fn is_success(&self) -> bool {
    matches!(self, RunOutcome::Succeeded)
  }

  pub fn failure(&self) -> Option<&StageFailure> {
    match self {
      RunOutcome::Succeeded => None,
      RunOutcome::FailedAt(failure) => Some(failure),
    }
  }

  /// Converts the outcome into a `Result` so callers can use `?`.
  pub fn into_result(self) -> Result<(), StageFailure> {
    match self {
      RunOutcome::Succeeded => Ok(()),
      RunOutcome::FailedAt(failure) => Err(failure),
    }
  }
}
