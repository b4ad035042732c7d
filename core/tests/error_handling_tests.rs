// tests/error_handling_tests.rs
mod common;
use common::*;
use serial_test::serial;
use stagehand::{ContextData, FailureCause, Pipeline, RunOutcome, StageStatus, StagehandError};

#[tokio::test]
#[serial]
async fn test_action_error_fails_the_stage_and_halts() {
  setup_tracing();
  let mut pipeline = Pipeline::<TestContext>::new();
  let a = add_stub_stage(&mut pipeline, "A", StubBehavior::Error("disk full"));
  let b = add_stub_stage(&mut pipeline, "B", StubBehavior::Succeed);

  let outcome = pipeline.run(ContextData::new(TestContext::default())).await;

  match outcome {
    RunOutcome::FailedAt(failure) => {
      assert_eq!(failure.stage_name, "A");
      match &failure.cause {
        FailureCause::Error(StagehandError::Action { source }) => assert_eq!(source.to_string(), "disk full"),
        other => panic!("Expected an action error, got {:?}", other),
      }
    }
    RunOutcome::Succeeded => panic!("Expected failure at A"),
  }
  assert_eq!((a.count(), b.count()), (1, 0));
}

#[tokio::test]
#[serial]
async fn test_command_exit_status_is_surfaced_on_failure() {
  setup_tracing();
  let mut pipeline = Pipeline::<TestContext>::new();
  add_stub_stage(&mut pipeline, "build", StubBehavior::Succeed);
  add_stub_stage(&mut pipeline, "ship", StubBehavior::ExitCode(255));

  let failure = pipeline
    .run(ContextData::new(TestContext::default()))
    .await
    .into_result()
    .unwrap_err();

  assert_eq!(failure.stage_index, 1);
  assert_eq!(failure.exit_code(), Some(255));
  let rendered = failure.to_string();
  assert!(rendered.contains("ship Failed"));
  assert!(rendered.contains("exit status 255"));
}

#[tokio::test]
#[serial]
async fn test_reported_failure_has_no_exit_code() {
  setup_tracing();
  let mut pipeline = Pipeline::<TestContext>::new();
  add_stub_stage(&mut pipeline, "A", StubBehavior::ReportFailure);

  let failure = pipeline
    .run(ContextData::new(TestContext::default()))
    .await
    .into_result()
    .unwrap_err();
  assert!(matches!(failure.cause, FailureCause::Reported));
  assert_eq!(failure.exit_code(), None);
}

#[tokio::test]
#[serial]
async fn test_anyhow_errors_convert_with_question_mark() {
  setup_tracing();
  let mut pipeline = Pipeline::<TestContext>::new();
  pipeline
    .add_stage("parse", "Parse Failed", |_ctx: ContextData<TestContext>| async {
      let port: u16 = "not-a-port".parse()?;
      Ok::<_, anyhow::Error>(port > 0)
    })
    .unwrap();

  let failure = pipeline
    .run(ContextData::new(TestContext::default()))
    .await
    .into_result()
    .unwrap_err();
  assert_eq!(failure.message, "Parse Failed");
  assert!(matches!(failure.cause, FailureCause::Error(StagehandError::Action { .. })));
}

#[tokio::test]
#[serial]
async fn test_wrapped_stagehand_error_is_not_double_wrapped() {
  setup_tracing();
  let mut pipeline = Pipeline::<TestContext>::new();
  pipeline
    .add_stage("remote", "Remote Run Failed", |_ctx: ContextData<TestContext>| async {
      let err = StagehandError::CommandFailed {
        command: "ssh".to_string(),
        exit_code: Some(2),
        stderr: String::new(),
      };
      Err::<StageStatus, _>(anyhow::Error::new(err))
    })
    .unwrap();

  let failure = pipeline
    .run(ContextData::new(TestContext::default()))
    .await
    .into_result()
    .unwrap_err();
  assert!(matches!(
    failure.cause,
    FailureCause::Error(StagehandError::CommandFailed { .. })
  ));
  assert_eq!(failure.exit_code(), Some(2));
}

#[test]
fn test_duplicate_stage_name_is_rejected() {
  let mut pipeline = Pipeline::<TestContext>::new();
  add_stub_stage(&mut pipeline, "build", StubBehavior::Succeed);

  let err = pipeline
    .add_stage("build", "again", |_ctx: ContextData<TestContext>| async {
      Ok::<_, StagehandError>(true)
    })
    .unwrap_err();
  assert!(matches!(err, StagehandError::DuplicateStage { ref stage_name } if stage_name == "build"));
  assert_eq!(pipeline.len(), 1);
}
