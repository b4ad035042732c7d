// stagehand-deploy/src/pipelines/stages.rs

//! The four deploy stage actions. Each one clones what it needs out of the
//! context, drops the lock, then runs its command.

use crate::pipelines::commands;
use crate::pipelines::context::DeployContext;
use stagehand::{CommandRunner, CommandSpec, ContextData, StageStatus};
use std::sync::Arc;
use tracing::{info, instrument, warn};

fn runner_and_command(
  ctx_data: &ContextData<DeployContext>,
  build: impl FnOnce(&crate::config::DeployConfig) -> CommandSpec,
) -> (Arc<dyn CommandRunner>, CommandSpec) {
  let guard = ctx_data.read();
  (guard.runner.clone(), build(&guard.config))
}

#[instrument(name = "stage::build_image", skip_all, err)]
pub async fn build_image(ctx_data: ContextData<DeployContext>) -> anyhow::Result<StageStatus> {
  let (runner, command) = runner_and_command(&ctx_data, commands::build_image);
  runner.run_checked(&command).await?;
  Ok(StageStatus::Succeeded)
}

#[instrument(name = "stage::package_artifact", skip_all, err)]
pub async fn package_artifact(ctx_data: ContextData<DeployContext>) -> anyhow::Result<StageStatus> {
  let (runner, command) = runner_and_command(&ctx_data, commands::package_artifact);
  runner.run_checked(&command).await?;

  let artifact_path = ctx_data.read().config.artifact_path();
  match tokio::fs::metadata(&artifact_path).await {
    Ok(meta) => {
      let bytes = meta.len();
      println!("    Artifact size: {:.2} MB", bytes as f64 / (1024.0 * 1024.0));
      ctx_data.write().artifact_bytes = Some(bytes);
    }
    Err(e) => warn!(path = %artifact_path.display(), error = %e, "Artifact size unavailable."),
  }
  Ok(StageStatus::Succeeded)
}

#[instrument(name = "stage::ship_artifact", skip_all, err)]
pub async fn ship_artifact(ctx_data: ContextData<DeployContext>) -> anyhow::Result<StageStatus> {
  let (runner, command) = runner_and_command(&ctx_data, commands::ship_artifact);
  {
    let guard = ctx_data.read();
    println!("    Transferring {} -> {}...", guard.config.artifact_name, guard.config.vm_ip);
  }
  runner.run_checked(&command).await?;
  Ok(StageStatus::Succeeded)
}

#[instrument(name = "stage::run_remote", skip_all, err)]
pub async fn run_remote(ctx_data: ContextData<DeployContext>) -> anyhow::Result<StageStatus> {
  let (runner, command) = runner_and_command(&ctx_data, commands::run_remote);
  runner.run_checked(&command).await?;
  info!("Remote container started.");
  Ok(StageStatus::Succeeded)
}
