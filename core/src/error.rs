// stagehand/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StagehandError {
  #[error("Command `{command}` exited unsuccessfully ({})", describe_exit(.exit_code))]
  CommandFailed {
    command: String,
    exit_code: Option<i32>,
    stderr: String,
  },

  #[error("Failed to spawn `{program}`. Source: {source}")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },

  #[error("Command has no program to execute")]
  EmptyCommand,

  #[error("Stage '{stage_name}' is already defined in this pipeline")]
  DuplicateStage { stage_name: String },

  #[error("Invalid run state transition: {from} -> {to}")]
  InvalidTransition { from: String, to: String },

  #[error("Error in stage action. Source: {source}")]
  Action {
    #[source]
    source: AnyhowError,
  },

  #[error("Internal stagehand error: {0}")]
  Internal(String),
}

impl StagehandError {
  /// Exit status of the external command behind this error, when there was one.
  pub fn exit_code(&self) -> Option<i32> {
    match self {
      StagehandError::CommandFailed { exit_code, .. } => *exit_code,
      StagehandError::Action { source } => source.downcast_ref::<StagehandError>().and_then(Self::exit_code),
      _ => None,
    }
  }
}

// Actions are free to use `?` on anything that converts into anyhow::Error.
impl From<AnyhowError> for StagehandError {
  fn from(err: AnyhowError) -> Self {
    match err.downcast::<StagehandError>() {
      Ok(inner) => inner,
      Err(err) => StagehandError::Action { source: err },
    }
  }
}

fn describe_exit(code: &Option<i32>) -> String {
  match code {
    Some(code) => format!("exit status {}", code),
    None => "terminated by signal".to_string(),
  }
}

pub type StagehandResult<T, E = StagehandError> = std::result::Result<T, E>;
