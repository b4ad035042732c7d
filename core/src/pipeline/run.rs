// stagehand/src/pipeline/run.rs

//! The transient record of one pipeline invocation: its state machine,
//! per-stage records and final outcome. Nothing here is persisted.

use crate::core::control::{FailureCause, RunOutcome, StageFailure, StageStatus};
use crate::error::{StagehandError, StagehandResult};
use std::fmt;
use std::time::Duration;

/// Lifecycle of a run.
///
/// `NotStarted -> Running(i) -> { Running(i+1) | Failed(i) | Succeeded }`.
/// `Failed` and `Succeeded` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
  NotStarted,
  Running { stage_index: usize },
  Failed { stage_index: usize },
  Succeeded,
}

impl RunState {
  pub fn is_terminal(self) -> bool {
    matches!(self, RunState::Failed { .. } | RunState::Succeeded)
  }
}

impl fmt::Display for RunState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RunState::NotStarted => write!(f, "NotStarted"),
      RunState::Running { stage_index } => write!(f, "Running({})", stage_index),
      RunState::Failed { stage_index } => write!(f, "Failed({})", stage_index),
      RunState::Succeeded => write!(f, "Succeeded"),
    }
  }
}

/// Identifies a stage to observers while it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageHeader {
  /// Zero-based position in the pipeline.
  pub index: usize,
  pub total: usize,
  pub name: String,
}

impl fmt::Display for StageHeader {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "[{}/{}] {}", self.index + 1, self.total, self.name)
  }
}

/// What happened to one invoked stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageRecord {
  pub index: usize,
  pub name: String,
  pub status: StageStatus,
  pub elapsed: Duration,
}

/// Execution record of a single pipeline run.
#[derive(Debug)]
pub struct PipelineRun {
  total_stages: usize,
  state: RunState,
  records: Vec<StageRecord>,
  failure: Option<StageFailure>,
  elapsed: Duration,
}

impl PipelineRun {
  pub fn new(total_stages: usize) -> Self {
    Self {
      total_stages,
      state: RunState::NotStarted,
      records: Vec::with_capacity(total_stages),
      failure: None,
      elapsed: Duration::ZERO,
    }
  }

  pub fn state(&self) -> RunState {
    self.state
  }

  pub fn total_stages(&self) -> usize {
    self.total_stages
  }

  /// Records of every stage that was invoked, in invocation order.
  pub fn records(&self) -> &[StageRecord] {
    &self.records
  }

  pub fn failure(&self) -> Option<&StageFailure> {
    self.failure.as_ref()
  }

  pub fn elapsed(&self) -> Duration {
    self.elapsed
  }

  /// Moves the run to `next`, rejecting anything the state machine does not allow.
  pub fn transition(&mut self, next: RunState) -> StagehandResult<()> {
    let allowed = match (self.state, next) {
      (RunState::NotStarted, RunState::Running { stage_index }) => stage_index == 0 && self.total_stages > 0,
      (RunState::NotStarted, RunState::Succeeded) => self.total_stages == 0,
      (RunState::Running { stage_index: cur }, RunState::Running { stage_index }) => {
        stage_index == cur + 1 && stage_index < self.total_stages
      }
      (RunState::Running { stage_index: cur }, RunState::Failed { stage_index }) => stage_index == cur,
      (RunState::Running { stage_index: cur }, RunState::Succeeded) => cur + 1 == self.total_stages,
      _ => false,
    };

    if !allowed {
      return Err(StagehandError::InvalidTransition {
        from: self.state.to_string(),
        to: next.to_string(),
      });
    }
    self.state = next;
    Ok(())
  }

  pub(crate) fn push_record(&mut self, record: StageRecord) {
    self.records.push(record);
  }

  pub(crate) fn fail(&mut self, failure: StageFailure) {
    let stage_index = failure.stage_index;
    if let Err(err) = self.transition(RunState::Failed { stage_index }) {
      tracing::error!(error = %err, "Forcing run into failed state.");
      self.state = RunState::Failed { stage_index };
    }
    self.failure = Some(failure);
  }

  pub(crate) fn set_elapsed(&mut self, elapsed: Duration) {
    self.elapsed = elapsed;
  }

  /// Consumes the record, yielding the run's terminal outcome.
  pub fn into_outcome(self) -> RunOutcome {
    match (self.state, self.failure) {
      (_, Some(failure)) => RunOutcome::FailedAt(failure),
      (RunState::Succeeded, None) => RunOutcome::Succeeded,
      (state, None) => RunOutcome::FailedAt(StageFailure {
        stage_index: self.records.len(),
        stage_name: String::new(),
        message: "Pipeline run did not finish".to_string(),
        cause: FailureCause::Error(StagehandError::Internal(format!(
          "run ended in non-terminal state {}",
          state
        ))),
      }),
    }
  }
}
