//! Child-process CLI runner.

use crate::artifacts::ports::{CliInvocation, CliOutput, CliRunner, CliRunnerError, CliRunnerResult};
use async_trait::async_trait;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info};

/// Maximum number of trailing output characters kept in failure messages.
const MESSAGE_TAIL_CHARS: usize = 2000;

/// Runs CLI invocations with `tokio::process`.
///
/// Arguments are passed as an argv vector; no shell is involved. Standard
/// input is piped only when the invocation carries input, and is closed
/// once written. The call is awaited to completion without a timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessCliRunner;

impl ProcessCliRunner {
    /// Creates a runner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CliRunner for ProcessCliRunner {
    async fn run(&self, invocation: &CliInvocation) -> CliRunnerResult<CliOutput> {
        let command = invocation.command();
        info!(command = %command, cwd = %invocation.working_directory(), "running CLI command");

        let stdin = if invocation.stdin().is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        };
        let mut child = Command::new(command.program())
            .args(command.to_args())
            .current_dir(invocation.working_directory())
            .envs(invocation.env())
            .stdin(stdin)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| CliRunnerError::Spawn {
                program: command.program().to_owned(),
                source: Arc::new(err),
            })?;

        if let (Some(input), Some(mut pipe)) = (invocation.stdin(), child.stdin.take()) {
            // A child that exits before reading reports its own failure below.
            if let Err(err) = pipe.write_all(input.as_bytes()).await {
                debug!(error = %err, "CLI command closed standard input early");
            }
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(CliRunnerError::runtime)?;

        let captured = CliOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(status = %output.status, "CLI command finished");

        if output.status.success() {
            return Ok(captured);
        }

        Err(CliRunnerError::Failed {
            command: command.to_display(),
            status: describe_status(output.status),
            message: failure_message(&captured),
        })
    }
}

fn describe_status(status: ExitStatus) -> String {
    status.code().map_or_else(
        || "no exit code (terminated by signal)".to_owned(),
        |code| format!("exit code {code}"),
    )
}

/// Prefers standard error, falls back to standard output, and keeps only the
/// tail so that long transfer logs do not flood the reported message.
fn failure_message(output: &CliOutput) -> String {
    let source = if output.stderr.trim().is_empty() {
        output.stdout.trim()
    } else {
        output.stderr.trim()
    };
    let total = source.chars().count();
    if total <= MESSAGE_TAIL_CHARS {
        return source.to_owned();
    }
    source.chars().skip(total - MESSAGE_TAIL_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_message_prefers_stderr() {
        let output = CliOutput {
            stdout: "[Info] Searching items".to_owned(),
            stderr: "[Error] No artifacts matched\n".to_owned(),
        };

        assert_eq!(failure_message(&output), "[Error] No artifacts matched");
    }

    #[test]
    fn failure_message_falls_back_to_stdout() {
        let output = CliOutput {
            stdout: "[Error] 404 Not Found".to_owned(),
            stderr: "   ".to_owned(),
        };

        assert_eq!(failure_message(&output), "[Error] 404 Not Found");
    }

    #[test]
    fn failure_message_keeps_only_the_tail() {
        let output = CliOutput {
            stdout: String::new(),
            stderr: format!("{}END", "x".repeat(MESSAGE_TAIL_CHARS * 2)),
        };

        let message = failure_message(&output);

        assert_eq!(message.chars().count(), MESSAGE_TAIL_CHARS);
        assert!(message.ends_with("END"));
    }
}
