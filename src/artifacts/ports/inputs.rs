//! Host input port.

/// Read-only access to the values the host pipeline supplies to a task.
///
/// Implementations return `None` for absent values. Callers treat empty
/// strings as absent.
pub trait TaskInputs: Send + Sync {
    /// Returns a task input by name, e.g. `dryRun`.
    fn input(&self, name: &str) -> Option<String>;

    /// Returns a host variable by name, e.g. `System.DefaultWorkingDirectory`.
    fn variable(&self, name: &str) -> Option<String>;

    /// Returns the URL of a service endpoint.
    fn endpoint_url(&self, endpoint_id: &str) -> Option<String>;

    /// Returns an authorization parameter of a service endpoint, e.g.
    /// `username`.
    fn endpoint_parameter(&self, endpoint_id: &str, key: &str) -> Option<String>;
}
