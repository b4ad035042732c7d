// stagehand-deploy/src/pipelines/context.rs

use crate::config::DeployConfig;
use stagehand::CommandRunner;
use std::sync::Arc;

/// Shared data for one deploy run.
#[derive(Clone)]
pub struct DeployContext {
  pub config: Arc<DeployConfig>,
  pub runner: Arc<dyn CommandRunner>,
  /// Size of the packaged artifact, recorded by the package stage.
  pub artifact_bytes: Option<u64>,
}

impl DeployContext {
  pub fn new(config: Arc<DeployConfig>, runner: Arc<dyn CommandRunner>) -> Self {
    Self {
      config,
      runner,
      artifact_bytes: None,
    }
  }
}

impl std::fmt::Debug for DeployContext {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("DeployContext")
      .field("config", &self.config)
      .field("artifact_bytes", &self.artifact_bytes)
      .finish_non_exhaustive()
  }
}
