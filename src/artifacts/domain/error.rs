//! Error types for task input validation and parsing.

use thiserror::Error;

/// Errors raised while turning raw task inputs into a validated request.
///
/// Every variant is a configuration error: it is detected before any server
/// registration or child process takes place.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InputError {
    /// A required input is absent or empty.
    #[error("input required: {0}")]
    MissingInput(String),

    /// An integer input holds a value that does not parse.
    #[error("input '{name}' must be an integer, got '{value}'")]
    InvalidInteger {
        /// Input name.
        name: String,
        /// Raw value supplied by the host.
        value: String,
    },

    /// The operation selector names an unsupported command.
    #[error("command not supported: {0}")]
    UnsupportedCommand(String),

    /// The host did not provide a default working directory.
    #[error("failed getting default working directory")]
    MissingWorkingDirectory,

    /// The spec source selector holds an unknown value.
    #[error("unsupported spec source '{0}', expected taskConfiguration or file")]
    UnsupportedSpecSource(String),

    /// Inline file spec content is not a JSON object.
    #[error("file spec is not a valid JSON object: {0}")]
    InvalidFileSpec(String),

    /// The service endpoint has no URL.
    #[error("service endpoint '{0}' has no URL")]
    MissingEndpointUrl(String),

    /// The service endpoint URL is not an HTTP(S) URL.
    #[error("service endpoint URL '{0}' must start with 'http://' or 'https://'")]
    InvalidEndpointUrl(String),

    /// The service endpoint has neither an access token nor a username.
    #[error("service endpoint '{0}' has no usable credentials")]
    MissingCredentials(String),
}

/// Error returned when an operation selector cannot be parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown operation: {0}")]
pub struct ParseOperationKindError(pub String);

impl From<ParseOperationKindError> for InputError {
    fn from(err: ParseOperationKindError) -> Self {
        Self::UnsupportedCommand(err.0)
    }
}
