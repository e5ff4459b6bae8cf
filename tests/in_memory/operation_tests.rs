//! Per-operation command shape and outcome through the full service.

use super::helpers::{TestContext, context, pipeline};
use generic_artifacts_task::artifacts::{
    adapters::memory::InMemoryTaskInputs, domain::CommandSpec,
};
use rstest::rstest;

async fn run_single(context: &TestContext, inputs: &InMemoryTaskInputs) -> CommandSpec {
    let outcome = context.service.run(inputs).await;
    assert!(outcome.succeeded(), "unexpected failure: {}", outcome.message());
    let commands = context
        .runner
        .repository_commands()
        .expect("commands should be readable");
    assert_eq!(commands.len(), 1);
    commands
        .into_iter()
        .next()
        .expect("one repository command should run")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn upload_links_build_info_before_other_flags(
    context: TestContext,
    pipeline: InMemoryTaskInputs,
) {
    let inputs = pipeline
        .with_input("command", "Upload")
        .with_input("collectBuildInfo", "true")
        .with_input("buildName", "payments")
        .with_input("buildNumber", "2024.6.1")
        .with_input("module", "api")
        .with_input("preserveSymlinks", "true")
        .with_input("syncDeletesRemote", "true")
        .with_input("syncDeletesPathRemote", "libs-release-local/app/")
        .with_input("insecureTls", "true");

    let command = run_single(&context, &inputs).await;

    assert_eq!(command.sub_command(), "rt u");
    assert_eq!(
        command.flag_names(),
        vec![
            "build-name",
            "build-number",
            "module",
            "symlinks",
            "sync-deletes",
            "server-id",
            "spec",
            "insecure-tls",
        ]
    );
    assert_eq!(command.flag_value("build-number"), Some("2024.6.1"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn download_passes_split_settings(context: TestContext, pipeline: InMemoryTaskInputs) {
    let inputs = pipeline
        .with_input("command", "Download")
        .with_input("splitCount", "4")
        .with_input("minSplit", "10240")
        .with_input("validateSymlinks", "True");

    let command = run_single(&context, &inputs).await;

    assert_eq!(command.sub_command(), "rt dl");
    assert_eq!(command.flag_value("split-count"), Some("4"));
    assert_eq!(command.flag_value("min-split"), Some("10240"));
    assert!(command.has_flag("validate-symlinks"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn set_properties_takes_property_list_positionally(
    context: TestContext,
    pipeline: InMemoryTaskInputs,
) {
    let inputs = pipeline
        .with_input("command", "Set Properties")
        .with_input("setProps", "status=released;owner=team a")
        .with_input("projectKey", "pay");

    let command = run_single(&context, &inputs).await;

    assert_eq!(command.sub_command(), "rt sp");
    assert_eq!(command.positionals(), vec!["status=released;owner=team a"]);
    assert_eq!(command.flag_value("project"), Some("pay"));
    assert!(
        command
            .to_display()
            .contains("'status=released;owner=team a'")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn move_with_spec_vars_and_fail_no_op(context: TestContext, pipeline: InMemoryTaskInputs) {
    let inputs = pipeline
        .with_input("command", "Move")
        .with_input("dryRun", "true")
        .with_input("replaceSpecVars", "true")
        .with_input("specVars", "version=1.2.3")
        .with_input("failNoOp", "true");

    let command = run_single(&context, &inputs).await;

    assert_eq!(
        command.flag_names(),
        vec!["dry-run", "server-id", "spec", "spec-vars", "fail-no-op"]
    );
    assert_eq!(command.flag_value("spec-vars"), Some("version=1.2.3"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn fail_no_op_trips_when_nothing_matches(
    context: TestContext,
    pipeline: InMemoryTaskInputs,
) {
    context
        .runner
        .set_matching_artifacts(0)
        .expect("matches should be scripted");
    let inputs = pipeline
        .with_input("command", "Delete")
        .with_input("failNoOp", "true");

    let outcome = context.service.run(&inputs).await;

    assert!(!outcome.succeeded());
    assert!(outcome.message().contains("no files affected"));
    assert!(
        context
            .runner
            .configured_servers()
            .expect("store should be readable")
            .is_empty()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn zero_matches_without_fail_no_op_succeed(
    context: TestContext,
    pipeline: InMemoryTaskInputs,
) {
    context
        .runner
        .set_matching_artifacts(0)
        .expect("matches should be scripted");

    let outcome = context
        .service
        .run(&pipeline.with_input("command", "Delete"))
        .await;

    assert!(outcome.succeeded());
}
