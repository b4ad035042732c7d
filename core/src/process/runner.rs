// stagehand/src/process/runner.rs

//! The command capability: the only way stage actions reach the outside world.

use crate::error::{StagehandError, StagehandResult};
use crate::process::command::{CommandOutput, CommandSpec, OutputMode};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{event, instrument, Level};

/// Executes external commands on behalf of stage actions.
///
/// Implementations return `Ok` whenever the command ran, including when it
/// exited non-zero (`CommandOutput::success == false`). `Err` is reserved for
/// commands that could not be started at all.
#[async_trait]
pub trait CommandRunner: Send + Sync {
  async fn run(&self, command: &CommandSpec) -> StagehandResult<CommandOutput>;

  /// Runs `command` and turns a non-zero exit into `StagehandError::CommandFailed`.
  async fn run_checked(&self, command: &CommandSpec) -> StagehandResult<CommandOutput> {
    self.run(command).await?.ensure_success(command)
  }
}

/// Spawns real child processes with `tokio::process` and waits for each to exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
  pub fn new() -> Self {
    SystemRunner
  }
}

#[async_trait]
impl CommandRunner for SystemRunner {
  #[instrument(name = "SystemRunner::run", skip_all, fields(program = command.program(), shell = command.is_shell()))]
  async fn run(&self, command: &CommandSpec) -> StagehandResult<CommandOutput> {
    let (program, args) = command.argv()?;
    event!(Level::INFO, command = %command, "Running command.");

    let mut cmd = Command::new(&program);
    cmd.args(&args);
    if let Some(dir) = command.working_dir() {
      cmd.current_dir(dir);
    }

    let output = match command.output_mode() {
      OutputMode::Inherit => {
        let status = cmd
          .stdin(Stdio::inherit())
          .stdout(Stdio::inherit())
          .stderr(Stdio::inherit())
          .status()
          .await
          .map_err(|source| StagehandError::Spawn {
            program: program.clone(),
            source,
          })?;
        CommandOutput {
          exit_code: status.code(),
          success: status.success(),
          stdout: String::new(),
          stderr: String::new(),
        }
      }
      OutputMode::Capture => {
        let out = cmd
          .stdin(Stdio::null())
          .output()
          .await
          .map_err(|source| StagehandError::Spawn {
            program: program.clone(),
            source,
          })?;
        CommandOutput {
          exit_code: out.status.code(),
          success: out.status.success(),
          stdout: String::from_utf8_lossy(&out.stdout).to_string(),
          stderr: String::from_utf8_lossy(&out.stderr).to_string(),
        }
      }
    };

    if output.success {
      event!(Level::DEBUG, exit_code = ?output.exit_code, "Command finished.");
    } else {
      event!(Level::WARN, exit_code = ?output.exit_code, "Command exited unsuccessfully.");
    }
    Ok(output)
  }
}
