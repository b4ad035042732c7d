// stagehand/examples/basic_pipeline.rs

use stagehand::{ContextData, Pipeline, RunOutcome, StageStatus, StagehandError};
use tracing::info;

// 1. Define the Context Data shared by the stages
#[derive(Clone, Debug, Default)]
struct BasicContext {
  message_log: Vec<String>,
  counter: i32,
}

#[tokio::main]
async fn main() -> Result<(), StagehandError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Pipeline Example ---");

  // 2. Define the stages, in the order they must run
  let mut pipeline = Pipeline::<BasicContext>::new();
  pipeline
    .add_stage("alpha", "Alpha Failed", |ctx: ContextData<BasicContext>| async move {
      let mut data = ctx.write();
      data.counter += 1;
      let msg = format!("Alpha executed: counter = {}", data.counter);
      data.message_log.push(msg);
      Ok::<_, StagehandError>(StageStatus::Succeeded)
    })?
    .add_stage("beta", "Beta Failed", |ctx: ContextData<BasicContext>| async move {
      let mut data = ctx.write();
      data.counter *= 2;
      let msg = format!("Beta executed: counter = {}", data.counter);
      data.message_log.push(msg);
      Ok::<_, StagehandError>(StageStatus::Succeeded)
    })?
    .add_stage("gamma", "Gamma Failed", |ctx: ContextData<BasicContext>| async move {
      let mut data = ctx.write();
      data.counter -= 1;
      let msg = format!("Gamma executed: counter = {}", data.counter);
      data.message_log.push(msg);
      Ok::<_, StagehandError>(StageStatus::Succeeded)
    })?;

  // 3. Print a progress banner before each stage
  pipeline.before_each(|header| info!("{}", header));

  // 4. Run it
  let pipeline_context = ContextData::new(BasicContext {
    message_log: Vec::new(),
    counter: 5,
  });
  match pipeline.run(pipeline_context.clone()).await {
    RunOutcome::Succeeded => info!("Pipeline completed successfully!"),
    RunOutcome::FailedAt(failure) => info!("Pipeline failed: {}", failure),
  }

  let final_context_state = pipeline_context.read();
  for log_entry in &final_context_state.message_log {
    info!("- {}", log_entry);
  }

  // (5+1)*2 - 1 = 11
  assert_eq!(final_context_state.counter, 11);
  Ok(())
}
