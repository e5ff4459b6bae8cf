//! In-memory CLI runner that models the CLI's server-profile store.

use crate::artifacts::{
    domain::CommandSpec,
    ports::{CliInvocation, CliOutput, CliRunner, CliRunnerError, CliRunnerResult},
};
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, RwLock};

/// Message the CLI prints when `--fail-no-op` trips.
const NO_OP_MESSAGE: &str = "[Error] No errors, but also no files affected (fail-no-op flag).";

/// CLI runner that records invocations without spawning processes.
///
/// `config add` and `config remove` maintain a set of configured server
/// ids. Repository commands fail when their `--server-id` is not
/// configured, mirroring the real CLI.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCliRunner {
    state: Arc<RwLock<InMemoryCliState>>,
}

#[derive(Debug, Default)]
struct InMemoryCliState {
    invocations: Vec<CliInvocation>,
    configured_servers: BTreeSet<String>,
    scripted_failures: BTreeMap<String, String>,
    matching_artifacts: Option<usize>,
}

fn lock_error(err: impl ToString) -> CliRunnerError {
    CliRunnerError::runtime(std::io::Error::other(err.to_string()))
}

fn failed(command: &CommandSpec, message: impl Into<String>) -> CliRunnerError {
    CliRunnerError::Failed {
        command: command.to_display(),
        status: "exit code 1".to_owned(),
        message: message.into(),
    }
}

impl InMemoryCliRunner {
    /// Creates a runner with an empty server-profile store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every invocation of `sub_command` (e.g. `rt u` or
    /// `config remove`) fail with `message`.
    ///
    /// # Errors
    ///
    /// Returns runtime errors when lock acquisition fails.
    pub fn fail_on(
        &self,
        sub_command: impl Into<String>,
        message: impl Into<String>,
    ) -> CliRunnerResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state
            .scripted_failures
            .insert(sub_command.into(), message.into());
        Ok(())
    }

    /// Sets how many artifacts repository commands affect. Zero makes
    /// commands carrying `--fail-no-op` fail.
    ///
    /// # Errors
    ///
    /// Returns runtime errors when lock acquisition fails.
    pub fn set_matching_artifacts(&self, count: usize) -> CliRunnerResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.matching_artifacts = Some(count);
        Ok(())
    }

    /// Returns every recorded invocation in call order.
    ///
    /// # Errors
    ///
    /// Returns runtime errors when lock acquisition fails.
    pub fn invocations(&self) -> CliRunnerResult<Vec<CliInvocation>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.invocations.clone())
    }

    /// Returns recorded repository commands (`rt ...`) in call order.
    ///
    /// # Errors
    ///
    /// Returns runtime errors when lock acquisition fails.
    pub fn repository_commands(&self) -> CliRunnerResult<Vec<CommandSpec>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .invocations
            .iter()
            .map(|invocation| invocation.command().clone())
            .filter(|command| command.sub_command().starts_with("rt "))
            .collect())
    }

    /// Returns the ids currently present in the server-profile store.
    ///
    /// # Errors
    ///
    /// Returns runtime errors when lock acquisition fails.
    pub fn configured_servers(&self) -> CliRunnerResult<Vec<String>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.configured_servers.iter().cloned().collect())
    }
}

impl InMemoryCliState {
    fn apply(&mut self, command: &CommandSpec) -> CliRunnerResult<CliOutput> {
        let sub_command = command.sub_command();
        if let Some(message) = self.scripted_failures.get(&sub_command) {
            return Err(failed(command, message.clone()));
        }

        let first_positional = command.positionals().first().map(|id| (*id).to_owned());
        match (sub_command.as_str(), first_positional) {
            ("config add", Some(server_id)) => {
                self.configured_servers.insert(server_id);
                Ok(CliOutput::default())
            }
            ("config remove", Some(server_id)) => {
                self.configured_servers.remove(&server_id);
                Ok(CliOutput::default())
            }
            _ => self.apply_repository_command(command),
        }
    }

    fn apply_repository_command(&self, command: &CommandSpec) -> CliRunnerResult<CliOutput> {
        let server_id = command.flag_value("server-id").unwrap_or_default();
        if !self.configured_servers.contains(server_id) {
            return Err(failed(
                command,
                format!("[Error] Server ID '{server_id}' does not exist."),
            ));
        }

        if self.matching_artifacts == Some(0) && command.has_flag("fail-no-op") {
            return Err(failed(command, NO_OP_MESSAGE));
        }

        let affected = self.matching_artifacts.unwrap_or(1);
        Ok(CliOutput {
            stdout: format!(r#"{{"status": "success", "totals": {{"success": {affected}, "failure": 0}}}}"#),
            stderr: String::new(),
        })
    }
}

#[async_trait]
impl CliRunner for InMemoryCliRunner {
    async fn run(&self, invocation: &CliInvocation) -> CliRunnerResult<CliOutput> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.invocations.push(invocation.clone());
        state.apply(invocation.command())
    }
}
