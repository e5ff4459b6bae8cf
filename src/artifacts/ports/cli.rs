//! CLI process port.

use crate::artifacts::domain::CommandSpec;
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for CLI runner operations.
pub type CliRunnerResult<T> = Result<T, CliRunnerError>;

/// One child-process call: command, working directory, extra environment
/// and optional standard input.
///
/// Standard input carries secrets such as passwords so that they never
/// appear in the process's argument list; it is masked in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct CliInvocation {
    command: CommandSpec,
    working_directory: Utf8PathBuf,
    env: BTreeMap<String, String>,
    stdin: Option<String>,
}

impl CliInvocation {
    /// Creates an invocation with the non-interactive CLI environment.
    #[must_use]
    pub fn new(command: CommandSpec, working_directory: impl Into<Utf8PathBuf>) -> Self {
        let env = [("JFROG_CLI_OFFER_CONFIG", "false"), ("CI", "true")]
            .into_iter()
            .map(|(key, value)| (key.to_owned(), value.to_owned()))
            .collect();
        Self {
            command,
            working_directory: working_directory.into(),
            env,
            stdin: None,
        }
    }

    /// Feeds `input` to the process on standard input.
    #[must_use]
    pub fn with_stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// Returns the command.
    #[must_use]
    pub const fn command(&self) -> &CommandSpec {
        &self.command
    }

    /// Returns the working directory.
    #[must_use]
    pub fn working_directory(&self) -> &Utf8Path {
        &self.working_directory
    }

    /// Returns environment variables added to the child process.
    #[must_use]
    pub const fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    /// Returns the standard input fed to the process, if any.
    #[must_use]
    pub fn stdin(&self) -> Option<&str> {
        self.stdin.as_deref()
    }
}

impl fmt::Debug for CliInvocation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("CliInvocation")
            .field("command", &self.command)
            .field("working_directory", &self.working_directory)
            .field("env", &self.env)
            .field("stdin", &self.stdin.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Captured output of a successful CLI call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOutput {
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
}

/// Runs CLI commands as child processes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CliRunner: Send + Sync {
    /// Runs the invocation to completion.
    ///
    /// # Errors
    ///
    /// Returns [`CliRunnerError::Spawn`] when the process cannot start and
    /// [`CliRunnerError::Failed`] when it exits unsuccessfully.
    async fn run(&self, invocation: &CliInvocation) -> CliRunnerResult<CliOutput>;
}

/// Errors returned by CLI runner adapters.
#[derive(Debug, Clone, Error)]
pub enum CliRunnerError {
    /// The process could not be started.
    #[error("failed to start '{program}': {source}")]
    Spawn {
        /// Program path.
        program: String,
        /// Underlying I/O error.
        source: Arc<std::io::Error>,
    },

    /// The process exited with a non-zero status or was killed.
    #[error("'{command}' exited with {status}: {message}")]
    Failed {
        /// Masked display form of the command.
        command: String,
        /// Exit status description, e.g. `exit code 1`.
        status: String,
        /// Tail of the captured error output.
        message: String,
    },

    /// Generic runtime failure.
    #[error("CLI runtime error: {0}")]
    Runtime(Arc<dyn std::error::Error + Send + Sync>),
}

impl CliRunnerError {
    /// Wraps a runtime error from the adapter.
    #[must_use]
    pub fn runtime(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Runtime(Arc::new(err))
    }
}
