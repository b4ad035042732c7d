// stagehand-deploy/src/errors.rs

use stagehand::{StageFailure, StagehandError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Configuration Error: {0}")]
  Config(String),

  /// The working directory is not a deployable project.
  #[error("Error: {0}")]
  Preflight(String),

  #[error("Pipeline Setup Error: {source}")]
  Setup {
    #[from]
    source: StagehandError,
  },

  #[error("{}", .0.message)]
  Stage(#[from] StageFailure),
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
