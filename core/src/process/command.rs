// stagehand/src/process/command.rs

//! Describes an external command and what came back from running it.

use crate::error::{StagehandError, StagehandResult};
use std::fmt;
use std::path::PathBuf;

/// Where the child's stdout/stderr go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
  /// Stream straight to this process's terminal. Nothing is captured.
  #[default]
  Inherit,
  /// Capture into `CommandOutput::stdout` / `stderr`.
  Capture,
}

/// An external command to execute, either directly or through `sh -c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
  program: String,
  args: Vec<String>,
  shell: bool,
  current_dir: Option<PathBuf>,
  output: OutputMode,
}

impl CommandSpec {
  /// A program executed directly, without a shell.
  pub fn new(program: impl Into<String>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
      shell: false,
      current_dir: None,
      output: OutputMode::Inherit,
    }
  }

  /// A command line interpreted by `sh -c`, for pipes and redirections.
  pub fn shell(line: impl Into<String>) -> Self {
    Self {
      program: line.into(),
      args: Vec::new(),
      shell: true,
      current_dir: None,
      output: OutputMode::Inherit,
    }
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.current_dir = Some(dir.into());
    self
  }

  pub fn capture_output(mut self) -> Self {
    self.output = OutputMode::Capture;
    self
  }

  pub fn program(&self) -> &str {
    &self.program
  }

  pub fn arguments(&self) -> &[String] {
    &self.args
  }

  pub fn is_shell(&self) -> bool {
    self.shell
  }

  pub fn working_dir(&self) -> Option<&PathBuf> {
    self.current_dir.as_ref()
  }

  pub fn output_mode(&self) -> OutputMode {
    self.output
  }

  /// Program and arguments as actually spawned. Shell commands go through `sh -c`.
  pub fn argv(&self) -> StagehandResult<(String, Vec<String>)> {
    if self.program.trim().is_empty() {
      return Err(StagehandError::EmptyCommand);
    }
    if self.shell {
      let mut args = vec!["-c".to_string(), self.program.clone()];
      args.extend(self.args.iter().cloned());
      Ok(("sh".to_string(), args))
    } else {
      Ok((self.program.clone(), self.args.clone()))
    }
  }
}

/// Space-joined rendering used in logs, e.g. `docker build -t app:prod .`.
impl fmt::Display for CommandSpec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.program)?;
    for arg in &self.args {
      write!(f, " {}", arg)?;
    }
    Ok(())
  }
}

/// Result of running a command to completion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
  /// `None` when the child was killed by a signal.
  pub exit_code: Option<i32>,
  pub success: bool,
  pub stdout: String,
  pub stderr: String,
}

impl CommandOutput {
  pub fn succeeded() -> Self {
    Self {
      exit_code: Some(0),
      success: true,
      ..Default::default()
    }
  }

  pub fn failed(exit_code: i32) -> Self {
    Self {
      exit_code: Some(exit_code),
      success: false,
      ..Default::default()
    }
  }

  /// Turns a non-zero exit into `StagehandError::CommandFailed`.
  pub fn ensure_success(self, spec: &CommandSpec) -> StagehandResult<Self> {
    if self.success {
      return Ok(self);
    }
    Err(StagehandError::CommandFailed {
      command: spec.to_string(),
      exit_code: self.exit_code,
      stderr: self.stderr,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn direct_command_spawns_program_itself() {
    let spec = CommandSpec::new("docker").args(["build", "-t", "app:prod", "."]);
    let (program, args) = spec.argv().unwrap();
    assert_eq!(program, "docker");
    assert_eq!(args, vec!["build", "-t", "app:prod", "."]);
    assert_eq!(spec.to_string(), "docker build -t app:prod .");
  }

  #[test]
  fn shell_command_goes_through_sh() {
    let spec = CommandSpec::shell("docker save app | gzip > app.tar.gz");
    let (program, args) = spec.argv().unwrap();
    assert_eq!(program, "sh");
    assert_eq!(args, vec!["-c", "docker save app | gzip > app.tar.gz"]);
    assert!(spec.is_shell());
  }

  #[test]
  fn blank_program_is_rejected() {
    assert!(matches!(CommandSpec::new("  ").argv(), Err(StagehandError::EmptyCommand)));
    assert!(matches!(CommandSpec::shell("").argv(), Err(StagehandError::EmptyCommand)));
  }

  #[test]
  fn ensure_success_keeps_exit_code_and_stderr() {
    let spec = CommandSpec::new("scp").arg("artifact.tar.gz");
    let output = CommandOutput {
      stderr: "Connection refused".to_string(),
      ..CommandOutput::failed(255)
    };
    let err = output.ensure_success(&spec).unwrap_err();
    assert_eq!(err.exit_code(), Some(255));
    match err {
      StagehandError::CommandFailed { command, stderr, .. } => {
        assert_eq!(command, "scp artifact.tar.gz");
        assert_eq!(stderr, "Connection refused");
      }
      other => panic!("Expected CommandFailed, got {:?}", other),
    }
  }
}
