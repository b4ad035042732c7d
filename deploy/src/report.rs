// stagehand-deploy/src/report.rs

//! Final status lines printed once the pipeline has finished.

use crate::config::DeployConfig;
use crate::pipelines::DeployContext;
use stagehand::RunOutcome;

pub fn render(outcome: &RunOutcome, deploy: &DeployContext) -> String {
  let config: &DeployConfig = &deploy.config;
  match outcome {
    RunOutcome::Succeeded => {
      let mut text = String::from("\n✅ Deployment to PROD Complete!\n");
      if let Some(bytes) = deploy.artifact_bytes {
        text.push_str(&format!(
          "Shipped {} ({:.2} MB).\n",
          config.artifact_name,
          bytes as f64 / (1024.0 * 1024.0)
        ));
      }
      text.push_str(&format!(
        "Check availability at {} (if proxy is configured) or http://{}:{} via tunnel.",
        config.public_url, config.jump_host, config.host_port
      ));
      text
    }
    RunOutcome::FailedAt(failure) => format!("\n❌ {}", failure.message),
  }
}
