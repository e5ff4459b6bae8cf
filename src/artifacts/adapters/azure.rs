//! Azure Pipelines host adapter.
//!
//! The agent exposes task inputs, pipeline variables and service endpoints
//! to the task process as environment variables, and reads results back from
//! `##vso[...]` logging commands on standard output.

use crate::artifacts::{domain::ExecutionOutcome, ports::TaskInputs};
use std::collections::BTreeMap;

/// Task inputs backed by the Azure Pipelines agent environment.
#[derive(Debug, Clone, Default)]
pub struct AzurePipelinesInputs {
    vars: BTreeMap<String, String>,
}

impl AzurePipelinesInputs {
    /// Captures the current process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Builds inputs from an explicit set of environment variables.
    #[must_use]
    pub fn from_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    fn lookup(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Converts a name to its agent environment form: `.` and spaces become `_`
/// and letters are upper-cased.
fn env_key(name: &str) -> String {
    name.trim()
        .chars()
        .map(|ch| match ch {
            '.' | ' ' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}

impl TaskInputs for AzurePipelinesInputs {
    fn input(&self, name: &str) -> Option<String> {
        self.lookup(&format!("INPUT_{}", env_key(name)))
    }

    fn variable(&self, name: &str) -> Option<String> {
        self.lookup(&env_key(name))
    }

    fn endpoint_url(&self, endpoint_id: &str) -> Option<String> {
        self.lookup(&format!("ENDPOINT_URL_{endpoint_id}"))
    }

    fn endpoint_parameter(&self, endpoint_id: &str, key: &str) -> Option<String> {
        self.lookup(&format!(
            "ENDPOINT_AUTH_PARAMETER_{endpoint_id}_{}",
            key.to_ascii_uppercase()
        ))
    }
}

/// Formats the `task.complete` logging command that reports the outcome.
///
/// Message data is escaped the way the agent expects: `%`, carriage return
/// and line feed become `%AZP25`, `%0D` and `%0A`.
#[must_use]
pub fn task_complete_command(outcome: &ExecutionOutcome) -> String {
    let result = if outcome.succeeded() {
        "Succeeded"
    } else {
        "Failed"
    };
    let message = outcome
        .message()
        .replace('%', "%AZP25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    format!("##vso[task.complete result={result};]{message}")
}
