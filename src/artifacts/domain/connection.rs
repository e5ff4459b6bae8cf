//! Service connection value objects.

use super::InputError;
use std::fmt;

/// Credentials used to authenticate a registered server profile.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Basic authentication.
    UsernamePassword {
        /// Account name.
        username: String,
        /// Account password or API key.
        password: String,
    },
    /// Bearer access token.
    AccessToken(String),
}

impl fmt::Debug for Credentials {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UsernamePassword { username, .. } => formatter
                .debug_struct("UsernamePassword")
                .field("username", username)
                .field("password", &"***")
                .finish(),
            Self::AccessToken(_) => formatter.debug_tuple("AccessToken").field(&"***").finish(),
        }
    }
}

/// Endpoint and credentials of the artifact repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionDetails {
    url: String,
    credentials: Credentials,
}

impl ConnectionDetails {
    /// Creates validated connection details.
    ///
    /// The URL is trimmed and must carry an `http://` or `https://` prefix.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidEndpointUrl`] when the URL prefix is not
    /// HTTP(S).
    pub fn new(url: impl Into<String>, credentials: Credentials) -> Result<Self, InputError> {
        let normalized = url.into().trim().to_owned();
        let has_valid_prefix =
            normalized.starts_with("http://") || normalized.starts_with("https://");
        if !has_valid_prefix {
            return Err(InputError::InvalidEndpointUrl(normalized));
        }

        Ok(Self {
            url: normalized,
            credentials,
        })
    }

    /// Returns the repository URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}
