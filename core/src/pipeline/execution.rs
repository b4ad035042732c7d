// stagehand/src/pipeline/execution.rs

//! Contains `Pipeline::execute()` and `Pipeline::run()`, which walk the stages
//! in order and stop at the first failure.

use crate::core::context_data::ContextData;
use crate::core::control::{FailureCause, RunOutcome, StageFailure, StageStatus};
use crate::pipeline::definition::Pipeline;
use crate::pipeline::run::{PipelineRun, RunState, StageHeader, StageRecord};
use std::time::Instant;
use tracing::{event, instrument, span, Instrument, Level};

impl<TData> Pipeline<TData>
where
  TData: 'static + Send + Sync,
{
  /// Runs every stage in declared order against `ctx_data` and returns the
  /// run's terminal outcome.
  ///
  /// A stage fails when its action returns `StageStatus::Failed` or an error.
  /// The first failure ends the run; later stages are never invoked and
  /// nothing already done is undone.
  pub async fn run(&self, ctx_data: ContextData<TData>) -> RunOutcome {
    self.execute(ctx_data).await.into_outcome()
  }

  /// Same as [`Pipeline::run`], but returns the full execution record.
  #[instrument(
    name = "Pipeline::execute",
    skip_all,
    fields(
      pipeline_context_data_type = %std::any::type_name::<TData>(),
      num_stages = self.stages.len(),
    )
  )]
  pub async fn execute(&self, ctx_data: ContextData<TData>) -> PipelineRun {
    let started = Instant::now();
    let total = self.stages.len();
    let mut run = PipelineRun::new(total);
    event!(Level::DEBUG, "Pipeline execution starting.");

    for (stage_idx, stage) in self.stages.iter().enumerate() {
      if let Err(err) = run.transition(RunState::Running { stage_index: stage_idx }) {
        event!(Level::ERROR, error = %err, "Run refused to advance.");
        run.fail(StageFailure {
          stage_index: stage_idx,
          stage_name: stage.name.clone(),
          message: stage.failure_message.clone(),
          cause: FailureCause::Error(err),
        });
        break;
      }

      let header = StageHeader {
        index: stage_idx,
        total,
        name: stage.name.clone(),
      };
      self.fire_before(&header);

      let stage_span = span!(
        Level::INFO,
        "pipeline_stage_execution",
        stage_name = stage.name.as_str(),
        stage_index = stage_idx
      );
      let stage_started = Instant::now();
      let result = (stage.action)(ctx_data.clone()).instrument(stage_span.clone()).await;

      let (status, cause) = match result {
        Ok(StageStatus::Succeeded) => (StageStatus::Succeeded, None),
        Ok(StageStatus::Failed) => (StageStatus::Failed, Some(FailureCause::Reported)),
        Err(err) => (StageStatus::Failed, Some(FailureCause::Error(err))),
      };

      let record = StageRecord {
        index: stage_idx,
        name: stage.name.clone(),
        status,
        elapsed: stage_started.elapsed(),
      };
      self.fire_after(&header, &record);
      run.push_record(record);

      if let Some(cause) = cause {
        stage_span.in_scope(|| event!(Level::ERROR, cause = %cause, "Stage failed, halting pipeline."));
        run.fail(StageFailure {
          stage_index: stage_idx,
          stage_name: stage.name.clone(),
          message: stage.failure_message.clone(),
          cause,
        });
        run.set_elapsed(started.elapsed());
        return run;
      }
      stage_span.in_scope(|| event!(Level::DEBUG, "Stage finished successfully."));
    }

    if !run.state().is_terminal() {
      if let Err(err) = run.transition(RunState::Succeeded) {
        event!(Level::ERROR, error = %err, "Run could not be marked succeeded.");
      }
    }
    run.set_elapsed(started.elapsed());
    event!(Level::DEBUG, elapsed_ms = run.elapsed().as_millis() as u64, "Pipeline execution completed successfully.");
    run
  }
}
