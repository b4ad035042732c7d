// stagehand/examples/fail_fast.rs

use stagehand::{CommandRunner, CommandSpec, ContextData, Pipeline, SystemRunner};
use tracing::{error, info};

#[derive(Debug, Default)]
struct FailFastContext {
  log: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Fail-Fast Example ---");

  let mut pipeline = Pipeline::<FailFastContext>::new();
  pipeline
    .add_stage("say_hello", "Hello Failed", |ctx: ContextData<FailFastContext>| async move {
      let out = SystemRunner.run_checked(&CommandSpec::new("echo").arg("hello").capture_output()).await?;
      ctx.write().log.push(out.stdout.trim().to_string());
      Ok::<_, anyhow::Error>(true)
    })?
    .add_stage("exit_nonzero", "Exit Failed", |ctx: ContextData<FailFastContext>| async move {
      ctx.write().log.push("about to fail".to_string());
      SystemRunner.run_checked(&CommandSpec::shell("exit 7")).await?;
      Ok::<_, anyhow::Error>(true)
    })?
    .add_stage("never_runs", "Unreachable", |ctx: ContextData<FailFastContext>| async move {
      error!("This stage should not execute!");
      ctx.write().log.push("never".to_string());
      Ok::<_, anyhow::Error>(true)
    })?;

  let ctx = ContextData::new(FailFastContext::default());
  let run = pipeline.execute(ctx.clone()).await;

  info!(state = %run.state(), "Run finished.");
  if let Some(failure) = run.failure() {
    info!("{} (exit code {:?})", failure, failure.exit_code());
  }

  let log = ctx.read().log.clone();
  assert_eq!(log, vec!["hello".to_string(), "about to fail".to_string()]);
  Ok(())
}
