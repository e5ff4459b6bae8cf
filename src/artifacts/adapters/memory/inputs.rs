//! In-memory host inputs.

use crate::artifacts::ports::TaskInputs;
use std::collections::BTreeMap;

/// Task inputs held in memory, keyed by their host names.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskInputs {
    inputs: BTreeMap<String, String>,
    variables: BTreeMap<String, String>,
    endpoint_urls: BTreeMap<String, String>,
    endpoint_parameters: BTreeMap<(String, String), String>,
}

impl InMemoryTaskInputs {
    /// Creates empty inputs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a task input.
    #[must_use]
    pub fn with_input(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_input(name, value);
        self
    }

    /// Sets a host variable.
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_variable(name, value);
        self
    }

    /// Sets a service endpoint URL.
    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_id: impl Into<String>, url: impl Into<String>) -> Self {
        self.endpoint_urls.insert(endpoint_id.into(), url.into());
        self
    }

    /// Sets a service endpoint authorization parameter.
    ///
    /// Keys are matched case-insensitively.
    #[must_use]
    pub fn with_endpoint_parameter(
        mut self,
        endpoint_id: impl Into<String>,
        key: &str,
        value: impl Into<String>,
    ) -> Self {
        self.endpoint_parameters.insert(
            (endpoint_id.into(), key.to_ascii_lowercase()),
            value.into(),
        );
        self
    }

    /// Sets or replaces a task input in place.
    pub fn set_input(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inputs.insert(name.into(), value.into());
    }

    /// Sets or replaces a host variable in place.
    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(name.into(), value.into());
    }

    /// Removes a task input.
    pub fn remove_input(&mut self, name: &str) {
        self.inputs.remove(name);
    }
}

impl TaskInputs for InMemoryTaskInputs {
    fn input(&self, name: &str) -> Option<String> {
        self.inputs.get(name).cloned()
    }

    fn variable(&self, name: &str) -> Option<String> {
        self.variables.get(name).cloned()
    }

    fn endpoint_url(&self, endpoint_id: &str) -> Option<String> {
        self.endpoint_urls.get(endpoint_id).cloned()
    }

    fn endpoint_parameter(&self, endpoint_id: &str, key: &str) -> Option<String> {
        self.endpoint_parameters
            .get(&(endpoint_id.to_owned(), key.to_ascii_lowercase()))
            .cloned()
    }
}
