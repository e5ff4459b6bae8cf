//! Invocations driven by the Azure Pipelines environment adapter.

use super::helpers::{ENDPOINT_ID, TestContext, WORKING_DIRECTORY, context};
use generic_artifacts_task::artifacts::adapters::{AzurePipelinesInputs, task_complete_command};
use rstest::rstest;

fn agent_environment(command: &str) -> AzurePipelinesInputs {
    AzurePipelinesInputs::from_vars([
        ("SYSTEM_DEFAULTWORKINGDIRECTORY".to_owned(), WORKING_DIRECTORY.to_owned()),
        ("BUILD_BUILDID".to_owned(), "2051".to_owned()),
        (
            format!("ENDPOINT_URL_{ENDPOINT_ID}"),
            "https://repo.example.com/artifactory".to_owned(),
        ),
        (
            format!("ENDPOINT_AUTH_PARAMETER_{ENDPOINT_ID}_APITOKEN"),
            "api-key".to_owned(),
        ),
        ("INPUT_CONNECTION".to_owned(), ENDPOINT_ID.to_owned()),
        ("INPUT_COMMAND".to_owned(), command.to_owned()),
        (
            "INPUT_FILESPEC".to_owned(),
            r#"{"files":[{"pattern":"out/*.nupkg","target":"nuget-local/"}]}"#.to_owned(),
        ),
        ("INPUT_DRYRUN".to_owned(), "true".to_owned()),
    ])
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn agent_environment_drives_invocation(context: TestContext) {
    let outcome = context.service.run(&agent_environment("Copy")).await;

    assert_eq!(
        task_complete_command(&outcome),
        "##vso[task.complete result=Succeeded;]Copy succeeded."
    );
    let invocations = context
        .runner
        .invocations()
        .expect("invocations should be readable");
    let add = invocations.first().expect("config add should run");
    assert!(add.command().has_flag("access-token-stdin"));
    assert_eq!(add.stdin(), Some("api-key"));
    let copy = context
        .runner
        .repository_commands()
        .expect("commands should be readable");
    assert!(copy.first().is_some_and(|command| command.has_flag("dry-run")));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unsupported_command_is_reported_as_failure(context: TestContext) {
    let outcome = context.service.run(&agent_environment("Promote")).await;

    assert_eq!(
        task_complete_command(&outcome),
        "##vso[task.complete result=Failed;]configuration failed: command not supported: Promote"
    );
    assert!(
        context
            .workspace
            .files()
            .expect("workspace should be readable")
            .is_empty()
    );
}
