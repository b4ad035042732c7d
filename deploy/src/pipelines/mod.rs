// stagehand-deploy/src/pipelines/mod.rs

//! Defines the deploy pipeline: build, package, ship, run remotely.

use crate::config::DeployConfig;
use stagehand::{Pipeline, StageHeader, StagehandResult};
use std::sync::Arc;

pub mod commands;
pub mod context;
pub mod stages;

pub use context::DeployContext;

pub const BUILD: &str = "build";
pub const PACKAGE: &str = "package";
pub const SHIP: &str = "ship";
pub const RUN_REMOTE: &str = "run_remote";

/// Builds the four-stage deploy pipeline. Progress banners are printed before
/// each stage, e.g. `[3/4] Shipping Artifact to glassy-vm (Tunneling through Jump Host)...`.
pub fn build_deploy_pipeline(config: Arc<DeployConfig>) -> StagehandResult<Pipeline<DeployContext>> {
  let mut pipeline = Pipeline::<DeployContext>::new();
  pipeline
    .add_stage(BUILD, "Build Failed", stages::build_image)?
    .add_stage(PACKAGE, "Build Failed", stages::package_artifact)?
    .add_stage(SHIP, "Shipping Failed", stages::ship_artifact)?
    .add_stage(RUN_REMOTE, "Remote Run Failed", stages::run_remote)?;

  pipeline.before_each(move |header| println!("\n{}", banner(header, &config)));

  tracing::info!(stages = ?pipeline.stage_names().collect::<Vec<_>>(), "Deploy pipeline defined.");
  Ok(pipeline)
}

fn banner(header: &StageHeader, config: &DeployConfig) -> String {
  let description = match header.name.as_str() {
    BUILD => format!("Building Docker Image Locally ({})...", config.image_name),
    PACKAGE => format!("Saving and Compressing Artifact ({})...", config.artifact_name),
    SHIP => format!("Shipping Artifact to {} (Tunneling through Jump Host)...", config.vm_host),
    RUN_REMOTE => "Loading and Running on VM...".to_string(),
    other => format!("{}...", other),
  };
  format!("[{}/{}] {}", header.index + 1, header.total, description)
}
