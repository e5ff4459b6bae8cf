//! Identifier type for transient CLI server profiles.

use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Length of the random nonce appended to generated server ids.
const NONCE_LENGTH: usize = 8;

/// Identifier of a server profile registered with the CLI for one invocation.
///
/// Generated ids have the form `<usage>_[<run>_]<millis>_<nonce>` so that
/// parallel jobs sharing one CLI configuration store never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerId(String);

impl ServerId {
    /// Generates a unique id for the given usage prefix.
    ///
    /// `run_id` is the host's pipeline run identifier when available; any
    /// character outside `[A-Za-z0-9-]` is replaced with `-`.
    #[must_use]
    pub fn generate(usage: &str, run_id: Option<&str>, clock: &impl Clock) -> Self {
        let nonce = Uuid::new_v4().simple().to_string();
        let short_nonce = nonce.get(..NONCE_LENGTH).unwrap_or(&nonce);
        let millis = clock.utc().timestamp_millis();

        let mut parts = vec![usage.to_owned()];
        if let Some(run) = run_id.map(sanitize).filter(|run| !run.is_empty()) {
            parts.push(run);
        }
        parts.push(millis.to_string());
        parts.push(short_nonce.to_owned());
        Self(parts.join("_"))
    }

    /// Wraps an existing id, e.g. one read back from logs.
    #[must_use]
    pub fn from_string(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ServerId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ServerId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

fn sanitize(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' {
                ch
            } else {
                '-'
            }
        })
        .collect()
}
