//! Terminal outcome of one task invocation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stage of an invocation at which a failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStage {
    /// Input validation, before any resource is acquired.
    Configuration,
    /// Server profile registration.
    Registration,
    /// File spec preparation or CLI execution.
    Execution,
    /// Server profile removal or file spec deletion.
    Cleanup,
}

impl TaskStage {
    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Registration => "registration",
            Self::Execution => "execution",
            Self::Cleanup => "cleanup",
        }
    }
}

impl fmt::Display for TaskStage {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// The single terminal result reported to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    succeeded: bool,
    message: String,
    failed_stage: Option<TaskStage>,
}

impl ExecutionOutcome {
    /// Creates a successful outcome.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            message: message.into(),
            failed_stage: None,
        }
    }

    /// Creates a failed outcome attributed to a stage.
    #[must_use]
    pub fn failure(stage: TaskStage, message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            message: message.into(),
            failed_stage: Some(stage),
        }
    }

    /// Returns whether the invocation succeeded.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.succeeded
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the failing stage, if any.
    #[must_use]
    pub const fn failed_stage(&self) -> Option<TaskStage> {
        self.failed_stage
    }
}
