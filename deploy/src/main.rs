// stagehand-deploy/src/main.rs

// Declare modules for the application
mod config;
mod errors;
mod pipelines;
mod report;
mod runners;

use crate::config::DeployConfig;
use crate::errors::{AppError, Result as AppResult};
use crate::pipelines::DeployContext;
use crate::runners::{DryRunRunner, EchoRunner};

use clap::Parser;
use stagehand::{CommandRunner, ContextData, SystemRunner};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Builds the app image locally, ships it through the jump host and
/// (re)starts it on the VM.
#[derive(Debug, Parser)]
#[command(name = "deploy-artifact", version, about)]
struct Cli {
  /// Print the commands that would run without executing any of them.
  #[arg(long)]
  dry_run: bool,

  /// Project root containing the Dockerfile. Defaults to the current directory.
  #[arg(long, env = "DEPLOY_PROJECT_DIR")]
  project_dir: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_target(false)
    .init();

  let result = run(Cli::parse()).await;
  match &result {
    Ok(()) => {}
    // Already reported by `deploy`.
    Err(AppError::Stage(failure)) => {
      tracing::error!(stage = %failure.stage_name, error = %failure, "Deployment failed.");
    }
    Err(e) => println!("{}", e),
  }
  ExitCode::from(exit_status(&result))
}

/// Process exit status for a finished deploy: 0 on success, 1 on any failure.
fn exit_status(result: &AppResult<()>) -> u8 {
  match result {
    Ok(()) => 0,
    Err(_) => 1,
  }
}

async fn run(cli: Cli) -> AppResult<()> {
  let project_dir = match cli.project_dir {
    Some(dir) => dir,
    None => std::env::current_dir().map_err(|e| AppError::Config(format!("Cannot resolve current directory: {}", e)))?,
  };
  let config = Arc::new(DeployConfig::from_env(project_dir)?);

  let runner: Arc<dyn CommandRunner> = if cli.dry_run {
    tracing::info!("Dry run enabled; no command will be executed.");
    Arc::new(EchoRunner::new(DryRunRunner))
  } else {
    Arc::new(EchoRunner::new(SystemRunner::new()))
  };

  deploy(config, runner).await
}

async fn deploy(config: Arc<DeployConfig>, runner: Arc<dyn CommandRunner>) -> AppResult<()> {
  for warning in preflight(&config)? {
    println!("Warning: {}", warning);
  }

  let pipeline = pipelines::build_deploy_pipeline(config.clone())?;
  let ctx_data = ContextData::new(DeployContext::new(config.clone(), runner));

  println!("--- Starting Deployment to {} ---", config.vm_host);
  let outcome = pipeline.run(ctx_data.clone()).await;
  println!("{}", report::render(&outcome, &ctx_data.read()));

  outcome.into_result()?;
  Ok(())
}

/// Checks the project layout before anything runs. Returns non-fatal warnings.
fn preflight(config: &DeployConfig) -> AppResult<Vec<String>> {
  if !config.dockerfile_path().is_file() {
    return Err(AppError::Preflight(
      "Run this script from the project root (where Dockerfile is).".to_string(),
    ));
  }

  let mut warnings = Vec::new();
  if config.jwt_secret.is_none() {
    warnings.push("DEPLOY_JWT_SECRET is not set; the container will start without JWT_SECRET.".to_string());
  }
  Ok(warnings)
}
