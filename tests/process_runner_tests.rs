//! Child-process tests for the `tokio::process` CLI runner.
//!
//! These use the POSIX shell in place of the `jf` binary.

#![cfg(unix)]

use camino::Utf8PathBuf;
use generic_artifacts_task::artifacts::{
    adapters::ProcessCliRunner,
    domain::{CommandArg, CommandSpec},
    ports::{CliInvocation, CliRunner, CliRunnerError},
};
use rstest::{fixture, rstest};
use tempfile::TempDir;

struct Scratch {
    _dir: TempDir,
    root: Utf8PathBuf,
}

#[fixture]
fn scratch() -> Scratch {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
        .expect("temp dir should be valid UTF-8");
    Scratch { _dir: dir, root }
}

fn shell(script: &str) -> CommandSpec {
    CommandSpec::new("sh")
        .arg(CommandArg::positional("-c"))
        .arg(CommandArg::positional(script))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn runs_in_working_directory_with_ci_environment(scratch: Scratch) {
    let invocation = CliInvocation::new(
        shell(r#"printf '%s|%s|%s' "$CI" "$JFROG_CLI_OFFER_CONFIG" "$(pwd -P)""#),
        &scratch.root,
    );

    let output = ProcessCliRunner::new()
        .run(&invocation)
        .await
        .expect("command should succeed");

    let canonical = std::fs::canonicalize(&scratch.root).expect("scratch should resolve");
    assert_eq!(
        output.stdout,
        format!("true|false|{}", canonical.display())
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn arguments_are_not_reinterpreted_by_a_shell(scratch: Scratch) {
    let command = CommandSpec::new("printf")
        .arg(CommandArg::positional("%s"))
        .arg(CommandArg::value("props", "a=1;b=$(whoami) c"));
    let invocation = CliInvocation::new(command, &scratch.root);

    let output = ProcessCliRunner::new()
        .run(&invocation)
        .await
        .expect("command should succeed");

    assert_eq!(output.stdout, "--props=a=1;b=$(whoami) c");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_zero_exit_reports_status_and_stderr(scratch: Scratch) {
    let invocation = CliInvocation::new(
        shell("echo '[Info] searching'; echo '[Error] 404 Not Found' >&2; exit 3"),
        &scratch.root,
    );

    let err = ProcessCliRunner::new()
        .run(&invocation)
        .await
        .expect_err("command should fail");

    let CliRunnerError::Failed {
        status, message, ..
    } = err
    else {
        panic!("expected a failed exit");
    };
    assert_eq!(status, "exit code 3");
    assert_eq!(message, "[Error] 404 Not Found");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_program_is_a_spawn_error(scratch: Scratch) {
    let invocation = CliInvocation::new(
        CommandSpec::new("/nonexistent/bin/jf").keywords("rt ping"),
        &scratch.root,
    );

    let err = ProcessCliRunner::new()
        .run(&invocation)
        .await
        .expect_err("spawn should fail");

    assert!(matches!(
        err,
        CliRunnerError::Spawn { ref program, .. } if program == "/nonexistent/bin/jf"
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn standard_input_reaches_the_process(scratch: Scratch) {
    let invocation = CliInvocation::new(
        shell(r#"read -r secret; printf '%s' "${#secret}""#),
        &scratch.root,
    )
    .with_stdin("s3cret-value");

    let output = ProcessCliRunner::new()
        .run(&invocation)
        .await
        .expect("command should succeed");

    assert_eq!(output.stdout, "12");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn commands_without_input_see_an_empty_stdin(scratch: Scratch) {
    let invocation = CliInvocation::new(shell("cat; printf done"), &scratch.root);

    let output = ProcessCliRunner::new()
        .run(&invocation)
        .await
        .expect("command should succeed");

    assert_eq!(output.stdout, "done");
}
