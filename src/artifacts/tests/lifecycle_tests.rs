//! Server lifecycle tests.

use std::sync::Arc;

use super::fixtures::{WORKING_DIRECTORY, context};
use crate::artifacts::{
    adapters::memory::InMemoryCliRunner,
    domain::{ConnectionDetails, Credentials},
    ports::{CliOutput, CliRunner, CliRunnerError, MockCliRunner},
    services::{InvocationContext, ServerLifecycleError, ServerLifecycleService},
};
use crate::config::TaskSettings;
use mockable::DefaultClock;
use mockall::Sequence;
use rstest::rstest;

fn service<R: CliRunner>(
    runner: Arc<R>,
) -> ServerLifecycleService<R, DefaultClock> {
    ServerLifecycleService::new(
        runner,
        Arc::new(DefaultClock),
        Arc::new(TaskSettings::default()),
    )
}

fn failed(message: &str) -> CliRunnerError {
    CliRunnerError::Failed {
        command: "jf config".to_owned(),
        status: "exit code 1".to_owned(),
        message: message.to_owned(),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn register_adds_profile_with_basic_credentials(context: InvocationContext) {
    let runner = Arc::new(InMemoryCliRunner::new());
    let lifecycle = service(Arc::clone(&runner));

    let lease = lifecycle.register(&context).await.expect("registration should succeed");

    let invocations = runner.invocations().expect("invocations should be readable");
    let add = invocations.first().expect("config add should run");
    let command = add.command();
    assert_eq!(command.sub_command(), "config add");
    assert_eq!(command.positionals(), vec![lease.server_id().as_str()]);
    assert_eq!(
        command.flag_names(),
        vec!["artifactory-url", "interactive", "user", "password-stdin"]
    );
    assert_eq!(command.flag_value("interactive"), Some("false"));
    assert_eq!(add.stdin(), Some("s3cret"));
    assert!(lease.server_id().as_str().starts_with("generic_4711_"));
    assert_eq!(
        runner.configured_servers().expect("store should be readable"),
        vec![lease.server_id().to_string()]
    );

    lifecycle.unregister(lease).await.expect("removal should succeed");
}

#[tokio::test(flavor = "multi_thread")]
async fn register_uses_access_token_when_configured() {
    let connection = ConnectionDetails::new(
        "https://acme.jfrog.io/artifactory",
        Credentials::AccessToken("tok-123".to_owned()),
    )
    .expect("valid connection");
    let token_context = InvocationContext::new(connection, WORKING_DIRECTORY, None);
    let runner = Arc::new(InMemoryCliRunner::new());
    let lifecycle = service(Arc::clone(&runner));

    let lease = lifecycle
        .register(&token_context)
        .await
        .expect("registration should succeed");
    lifecycle.unregister(lease).await.expect("removal should succeed");

    let invocations = runner.invocations().expect("invocations should be readable");
    let add = invocations.first().expect("config add should run");
    assert!(add.command().has_flag("access-token-stdin"));
    assert!(!add.command().has_flag("user"));
    assert_eq!(add.stdin(), Some("tok-123"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unregister_removes_profile_quietly(context: InvocationContext) {
    let runner = Arc::new(InMemoryCliRunner::new());
    let lifecycle = service(Arc::clone(&runner));
    let lease = lifecycle.register(&context).await.expect("registration should succeed");
    let server_id = lease.server_id().clone();

    lifecycle.unregister(lease).await.expect("removal should succeed");

    let invocations = runner.invocations().expect("invocations should be readable");
    let remove = invocations.last().expect("config remove should run").command();
    assert_eq!(remove.sub_command(), "config remove");
    assert_eq!(remove.positionals(), vec![server_id.as_str()]);
    assert_eq!(remove.flag_names(), vec!["quiet"]);
    assert!(
        runner
            .configured_servers()
            .expect("store should be readable")
            .is_empty()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_registration_removes_partial_profile(context: InvocationContext) {
    let mut runner = MockCliRunner::new();
    let mut sequence = Sequence::new();
    runner
        .expect_run()
        .withf(|invocation| invocation.command().sub_command() == "config add")
        .times(1)
        .in_sequence(&mut sequence)
        .returning(|_| Err(failed("401 Unauthorized")));
    runner
        .expect_run()
        .withf(|invocation| invocation.command().sub_command() == "config remove")
        .times(1)
        .in_sequence(&mut sequence)
        .returning(|_| Ok(CliOutput::default()));
    let lifecycle = service(Arc::new(runner));

    let err = lifecycle
        .register(&context)
        .await
        .expect_err("registration should fail");

    let ServerLifecycleError::Register { server_id, source } = err else {
        panic!("expected a registration error");
    };
    assert!(server_id.as_str().starts_with("generic_"));
    assert!(source.to_string().contains("401 Unauthorized"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_partial_removal_keeps_registration_error(context: InvocationContext) {
    let mut runner = MockCliRunner::new();
    runner
        .expect_run()
        .times(2)
        .returning(|_| Err(failed("config store is locked")));
    let lifecycle = service(Arc::new(runner));

    let err = lifecycle
        .register(&context)
        .await
        .expect_err("registration should fail");

    assert!(matches!(err, ServerLifecycleError::Register { .. }));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_removal_is_reported(context: InvocationContext) {
    let mut runner = MockCliRunner::new();
    runner
        .expect_run()
        .withf(|invocation| invocation.command().sub_command() == "config add")
        .returning(|_| Ok(CliOutput::default()));
    runner
        .expect_run()
        .withf(|invocation| invocation.command().sub_command() == "config remove")
        .returning(|_| Err(failed("permission denied")));
    let lifecycle = service(Arc::new(runner));
    let lease = lifecycle.register(&context).await.expect("registration should succeed");
    let server_id = lease.server_id().clone();

    let err = lifecycle
        .unregister(lease)
        .await
        .expect_err("removal should fail");

    assert!(matches!(
        err,
        ServerLifecycleError::Unregister { server_id: ref id, .. } if *id == server_id
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ids_differ_between_invocations(context: InvocationContext) {
    let runner = Arc::new(InMemoryCliRunner::new());
    let lifecycle = service(Arc::clone(&runner));

    let first = lifecycle.register(&context).await.expect("registration should succeed");
    let second = lifecycle.register(&context).await.expect("registration should succeed");

    assert_ne!(first.server_id(), second.server_id());
    lifecycle.unregister(first).await.expect("removal should succeed");
    lifecycle.unregister(second).await.expect("removal should succeed");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn secrets_stay_out_of_argv_and_logs(context: InvocationContext) {
    let runner = Arc::new(InMemoryCliRunner::new());
    let lifecycle = service(Arc::clone(&runner));

    let lease = lifecycle.register(&context).await.expect("registration should succeed");
    lifecycle.unregister(lease).await.expect("removal should succeed");

    for invocation in runner.invocations().expect("invocations should be readable") {
        let command = invocation.command();
        assert!(command.to_args().iter().all(|arg| !arg.contains("s3cret")));
        assert!(!command.to_display().contains("s3cret"));
        assert!(!format!("{invocation:?}").contains("s3cret"));
    }
}
