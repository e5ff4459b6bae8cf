//! Runtime settings for the generic artifacts task.
//!
//! Settings describe how the task talks to its environment rather than what
//! a particular pipeline step asks for; per-step values arrive as task
//! inputs. The binary fills these from command-line flags and environment
//! variables.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// Default CLI executable name, resolved through `PATH`.
pub const DEFAULT_CLI_PATH: &str = "jf";

/// Default prefix of generated server ids.
pub const DEFAULT_SERVER_ID_PREFIX: &str = "generic";

/// Host variable that overrides the requested build number in
/// resolve-by-definition mode.
pub const DEFAULT_BUILD_NUMBER_OVERRIDE_VARIABLE: &str = "ARTIFACTORY_RELEASE_BUILD_NUMBER";

/// Message historically reported for every successful operation.
pub const LEGACY_SUCCESS_MESSAGE: &str = "Download Succeeded.";

/// Settings shared by every invocation of the task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskSettings {
    cli_path: Utf8PathBuf,
    server_id_prefix: String,
    build_number_override_variable: String,
    legacy_success_message: bool,
}

impl Default for TaskSettings {
    fn default() -> Self {
        Self {
            cli_path: Utf8PathBuf::from(DEFAULT_CLI_PATH),
            server_id_prefix: DEFAULT_SERVER_ID_PREFIX.to_owned(),
            build_number_override_variable: DEFAULT_BUILD_NUMBER_OVERRIDE_VARIABLE.to_owned(),
            legacy_success_message: false,
        }
    }
}

impl TaskSettings {
    /// Creates default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the CLI executable path.
    #[must_use]
    pub fn with_cli_path(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.cli_path = path.into();
        self
    }

    /// Sets the prefix of generated server ids.
    #[must_use]
    pub fn with_server_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.server_id_prefix = prefix.into();
        self
    }

    /// Sets the host variable that overrides the build number.
    #[must_use]
    pub fn with_build_number_override_variable(mut self, name: impl Into<String>) -> Self {
        self.build_number_override_variable = name.into();
        self
    }

    /// Reports `Download Succeeded.` for every operation, for consumers that
    /// match on the historical message.
    #[must_use]
    pub const fn with_legacy_success_message(mut self, enabled: bool) -> Self {
        self.legacy_success_message = enabled;
        self
    }

    /// Returns the CLI executable path.
    #[must_use]
    pub fn cli_path(&self) -> &Utf8Path {
        &self.cli_path
    }

    /// Returns the prefix of generated server ids.
    #[must_use]
    pub fn server_id_prefix(&self) -> &str {
        &self.server_id_prefix
    }

    /// Returns the build-number override variable name.
    #[must_use]
    pub fn build_number_override_variable(&self) -> &str {
        &self.build_number_override_variable
    }

    /// Returns whether the legacy success message is enabled.
    #[must_use]
    pub const fn legacy_success_message(&self) -> bool {
        self.legacy_success_message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_jf_on_path() {
        let settings = TaskSettings::default();

        assert_eq!(settings.cli_path(), Utf8Path::new("jf"));
        assert_eq!(settings.server_id_prefix(), "generic");
        assert_eq!(
            settings.build_number_override_variable(),
            "ARTIFACTORY_RELEASE_BUILD_NUMBER"
        );
        assert!(!settings.legacy_success_message());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let settings: TaskSettings =
            serde_json::from_str(r#"{"cli_path": "/opt/jfrog/jf"}"#).expect("valid settings");

        assert_eq!(settings.cli_path(), Utf8Path::new("/opt/jfrog/jf"));
        assert_eq!(settings.server_id_prefix(), "generic");
    }
}
