//! File spec sources and the options shared by generic operations.

use super::InputError;
use camino::Utf8PathBuf;

/// Validated inline file spec document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSpec(String);

impl FileSpec {
    /// Validates inline file spec content.
    ///
    /// The content must parse as a JSON object. It is stored verbatim so the
    /// CLI receives exactly what the pipeline author wrote.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidFileSpec`] when the content is not a JSON
    /// object.
    pub fn parse(content: impl Into<String>) -> Result<Self, InputError> {
        let text = content.into();
        let value: serde_json::Value = serde_json::from_str(&text)
            .map_err(|err| InputError::InvalidFileSpec(err.to_string()))?;
        if !value.is_object() {
            return Err(InputError::InvalidFileSpec(
                "top-level value must be an object".to_owned(),
            ));
        }
        Ok(Self(text))
    }

    /// Returns the document text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Where a generic operation reads its file spec from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecSource {
    /// Inline content written to a temporary file for the invocation.
    TaskConfiguration(FileSpec),
    /// An existing spec file referenced in place.
    File(Utf8PathBuf),
}

/// Options shared by the seven explicit operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonOptions {
    /// File spec source.
    pub spec: SpecSource,
    /// Spec variable substitutions, e.g. `key1=val1;key2=val2`.
    pub spec_vars: Option<String>,
    /// Fail when no file is affected.
    pub fail_no_op: bool,
    /// Skip TLS certificate verification.
    pub insecure_tls: bool,
}

impl CommonOptions {
    /// Creates options with the given spec source and every flag disabled.
    #[must_use]
    pub const fn new(spec: SpecSource) -> Self {
        Self {
            spec,
            spec_vars: None,
            fail_no_op: false,
            insecure_tls: false,
        }
    }
}

/// Returns the time-stamped name of a temporary spec file,
/// `genericSpec<millis>.json`.
#[must_use]
pub fn spec_file_name(millis: i64) -> String {
    format!("genericSpec{millis}.json")
}
