// stagehand-deploy/src/runners.rs

//! Command runners used by the CLI on top of `stagehand::SystemRunner`.

use async_trait::async_trait;
use stagehand::{CommandOutput, CommandRunner, CommandSpec, StagehandResult};

/// Echoes every command to stdout before delegating, and reports failures the
/// way an operator watching the terminal expects.
pub struct EchoRunner<R> {
  inner: R,
}

impl<R: CommandRunner> EchoRunner<R> {
  pub fn new(inner: R) -> Self {
    Self { inner }
  }
}

#[async_trait]
impl<R: CommandRunner> CommandRunner for EchoRunner<R> {
  async fn run(&self, command: &CommandSpec) -> StagehandResult<CommandOutput> {
    println!("--> Running: {}", command);
    match self.inner.run(command).await {
      Ok(output) => {
        if !output.success {
          match output.exit_code {
            Some(code) => println!("Error running command: `{}` returned non-zero exit status {}.", command, code),
            None => println!("Error running command: `{}` was terminated by a signal.", command),
          }
        }
        Ok(output)
      }
      Err(e) => {
        println!("Error running command: {}", e);
        Err(e)
      }
    }
  }
}

/// Pretends every command succeeded without spawning anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunRunner;

#[async_trait]
impl CommandRunner for DryRunRunner {
  async fn run(&self, command: &CommandSpec) -> StagehandResult<CommandOutput> {
    command.argv()?;
    tracing::info!(command = %command, "Dry run, not executing.");
    Ok(CommandOutput::succeeded())
  }
}
