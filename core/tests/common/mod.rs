// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use parking_lot::Mutex;
use stagehand::{CommandOutput, CommandRunner, CommandSpec, ContextData, Pipeline, StageStatus, StagehandError, StagehandResult};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;

// --- Common Context Struct ---
#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub counter: i32,
  pub message: String,
  pub stages_executed: Vec<String>,
}

// --- Stub Stages ---

/// How a stub stage's action ends.
#[derive(Clone, Copy, Debug)]
pub enum StubBehavior {
  Succeed,
  /// Returns `StageStatus::Failed` without an error.
  ReportFailure,
  /// Returns an action error built from the message.
  Error(&'static str),
  /// Returns `CommandFailed` with the given exit code, as a failed external command would.
  ExitCode(i32),
}

/// Per-stage invocation counter handed back by `add_stub_stage`.
#[derive(Clone, Debug, Default)]
pub struct InvocationCounter(Arc<AtomicUsize>);

impl InvocationCounter {
  pub fn count(&self) -> usize {
    self.0.load(Ordering::SeqCst)
  }
}

/// Appends a stage that counts its invocations, records its name in the context
/// and then behaves as told.
pub fn add_stub_stage(
  pipeline: &mut Pipeline<TestContext>,
  name: &'static str,
  behavior: StubBehavior,
) -> InvocationCounter {
  let counter = InvocationCounter::default();
  let counter_for_action = counter.clone();
  pipeline
    .add_stage(name, format!("{} Failed", name), move |ctx: ContextData<TestContext>| {
      let counter = counter_for_action.clone();
      async move {
        counter.0.fetch_add(1, Ordering::SeqCst);
        ACTION_INVOCATIONS.fetch_add(1, Ordering::SeqCst);
        {
          let mut guard = ctx.write();
          guard.counter += 1;
          guard.stages_executed.push(name.to_string());
        }
        tracing::debug!(target: "test_stages", stage = name, ?behavior, "stub stage executed");
        match behavior {
          StubBehavior::Succeed => Ok(StageStatus::Succeeded),
          StubBehavior::ReportFailure => Ok(StageStatus::Failed),
          StubBehavior::Error(message) => Err(StagehandError::from(anyhow::anyhow!(message))),
          StubBehavior::ExitCode(code) => Err(StagehandError::CommandFailed {
            command: name.to_string(),
            exit_code: Some(code),
            stderr: String::new(),
          }),
        }
      }
    })
    .expect("stub stage names are unique within a test");
  counter
}

// --- Fake Command Runner ---

/// Records every command it is asked to run. Commands whose program matches a
/// scripted failure exit with that code; everything else succeeds.
#[derive(Clone, Default)]
pub struct FakeRunner {
  invoked: Arc<Mutex<Vec<String>>>,
  failures: Arc<Mutex<Vec<(String, i32)>>>,
}

impl FakeRunner {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn fail_on(self, program: &str, exit_code: i32) -> Self {
    self.failures.lock().push((program.to_string(), exit_code));
    self
  }

  pub fn invoked(&self) -> Vec<String> {
    self.invoked.lock().clone()
  }
}

#[async_trait]
impl CommandRunner for FakeRunner {
  async fn run(&self, command: &CommandSpec) -> StagehandResult<CommandOutput> {
    command.argv()?;
    self.invoked.lock().push(command.to_string());
    let scripted = self
      .failures
      .lock()
      .iter()
      .find(|(program, _)| program == command.program())
      .map(|(_, code)| *code);
    Ok(match scripted {
      Some(code) => CommandOutput::failed(code),
      None => CommandOutput::succeeded(),
    })
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Global counter across all stub stages ---
pub static ACTION_INVOCATIONS: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));

pub fn reset_counters() {
  ACTION_INVOCATIONS.store(0, Ordering::SeqCst);
}
