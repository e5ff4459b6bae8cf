//! Operation variants and their validated option values.

use super::{CommandArg, ParseOperationKindError, params};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies which operation an invocation performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Upload local files to the repository.
    Upload,
    /// Download repository files to the agent.
    Download,
    /// Set properties on repository files.
    SetProperties,
    /// Delete properties from repository files.
    DeleteProperties,
    /// Move repository files.
    Move,
    /// Copy repository files.
    Copy,
    /// Delete repository files.
    Delete,
    /// Download every artifact of a named build.
    ResolveByDefinition,
}

impl OperationKind {
    /// The seven operations selectable through the `command` input.
    pub const EXPLICIT: [Self; 7] = [
        Self::Upload,
        Self::Download,
        Self::SetProperties,
        Self::DeleteProperties,
        Self::Move,
        Self::Copy,
        Self::Delete,
    ];

    /// Returns the canonical snake-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Download => "download",
            Self::SetProperties => "set_properties",
            Self::DeleteProperties => "delete_properties",
            Self::Move => "move",
            Self::Copy => "copy",
            Self::Delete => "delete",
            Self::ResolveByDefinition => "resolve_by_definition",
        }
    }

    /// Returns the host selector value for explicit operations.
    #[must_use]
    pub const fn selector(self) -> Option<&'static str> {
        match self {
            Self::Upload => Some("Upload"),
            Self::Download => Some("Download"),
            Self::SetProperties => Some("Set Properties"),
            Self::DeleteProperties => Some("Delete Properties"),
            Self::Move => Some("Move"),
            Self::Copy => Some("Copy"),
            Self::Delete => Some("Delete"),
            Self::ResolveByDefinition => None,
        }
    }

    /// Returns the CLI sub-command keywords.
    #[must_use]
    pub const fn sub_command(self) -> &'static str {
        match self {
            Self::Upload => "rt u",
            Self::Download | Self::ResolveByDefinition => "rt dl",
            Self::SetProperties => "rt sp",
            Self::DeleteProperties => "rt delp",
            Self::Move => "rt mv",
            Self::Copy => "rt cp",
            Self::Delete => "rt del",
        }
    }

    /// Returns the operation-specific success message.
    #[must_use]
    pub const fn success_message(self) -> &'static str {
        match self {
            Self::Upload => "Upload succeeded.",
            Self::Download => "Download succeeded.",
            Self::SetProperties => "Set properties succeeded.",
            Self::DeleteProperties => "Delete properties succeeded.",
            Self::Move => "Move succeeded.",
            Self::Copy => "Copy succeeded.",
            Self::Delete => "Delete succeeded.",
            Self::ResolveByDefinition => "Artifact source download succeeded.",
        }
    }

    /// Parses a host selector value such as `Set Properties`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseOperationKindError`] for unknown selectors, including
    /// the resolve-by-definition mode which has no selector.
    pub fn from_selector(value: &str) -> Result<Self, ParseOperationKindError> {
        let trimmed = value.trim();
        Self::EXPLICIT
            .into_iter()
            .find(|kind| kind.selector() == Some(trimmed))
            .ok_or_else(|| ParseOperationKindError(value.to_owned()))
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Build-info linkage for uploads and downloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    /// Build name.
    pub name: String,
    /// Build number.
    pub number: String,
    /// Optional build module.
    pub module: Option<String>,
}

impl BuildInfo {
    fn fragments(&self) -> impl Iterator<Item = CommandArg> + '_ {
        [
            Some(CommandArg::value("build-name", &self.name)),
            Some(CommandArg::value("build-number", &self.number)),
            params::value_if(self.module.as_deref(), "module"),
        ]
        .into_iter()
        .flatten()
    }
}

/// Debian `distribution/component/architecture` triple for uploads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebianTriple {
    distribution: String,
    component: String,
    architecture: String,
}

impl DebianTriple {
    /// Creates a triple from its three parts.
    #[must_use]
    pub fn new(
        distribution: impl Into<String>,
        component: impl Into<String>,
        architecture: impl Into<String>,
    ) -> Self {
        Self {
            distribution: distribution.into(),
            component: component.into(),
            architecture: architecture.into(),
        }
    }

    /// Returns the `--deb` value with each part's `/` escaped.
    #[must_use]
    pub fn flag_value(&self) -> String {
        [&self.distribution, &self.component, &self.architecture]
            .map(|part| params::escape_separator(part))
            .join("/")
    }
}

/// Options of an upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadOptions {
    /// Build-info linkage.
    pub build_info: Option<BuildInfo>,
    /// Report what would be uploaded without uploading.
    pub dry_run: bool,
    /// Upload symlinks as symlinks.
    pub preserve_symlinks: bool,
    /// Debian properties to attach.
    pub debian: Option<DebianTriple>,
    /// Remote path whose files absent locally are deleted.
    pub sync_deletes: Option<String>,
}

/// Options of a download.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadOptions {
    /// Build-info linkage.
    pub build_info: Option<BuildInfo>,
    /// Report what would be downloaded without downloading.
    pub dry_run: bool,
    /// Number of parts per concurrent download.
    pub split_count: Option<i64>,
    /// Minimum size in KB for concurrent download.
    pub min_split: Option<i64>,
    /// Validate symlink checksums.
    pub validate_symlinks: bool,
    /// Local path whose files absent remotely are deleted.
    pub sync_deletes: Option<String>,
}

/// Options of a property mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertiesOptions {
    /// Property list, e.g. `a=1;b=2` or `a,b`.
    pub properties: String,
}

/// Options of move, copy and delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DryRunOptions {
    /// Report what would change without changing anything.
    pub dry_run: bool,
}

/// Options of the resolve-by-definition download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionOptions {
    /// Build name taken from the definition input.
    pub build_name: String,
    /// Build number, possibly overridden by the host.
    pub build_number: String,
    /// Normalised target directory ending in `/`.
    pub download_path: String,
}

impl DefinitionOptions {
    /// Creates options with a normalised download path.
    #[must_use]
    pub fn new(
        build_name: impl Into<String>,
        build_number: impl Into<String>,
        download_path: &str,
    ) -> Self {
        Self {
            build_name: build_name.into(),
            build_number: build_number.into(),
            download_path: normalize_download_path(download_path),
        }
    }

    /// Returns the `--build` filter value, `<name>/<number>`.
    #[must_use]
    pub fn build_filter(&self) -> String {
        format!("{}/{}", self.build_name, self.build_number)
    }
}

/// Appends a trailing `/` unless the path already ends in a separator, then
/// normalises every `\` to `/`.
#[must_use]
pub fn normalize_download_path(raw: &str) -> String {
    let mut path = raw.to_owned();
    if !path.ends_with('/') && !path.ends_with('\\') {
        path.push('/');
    }
    path.replace('\\', "/")
}

/// The operation requested for one invocation, with its options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// `rt u`.
    Upload(UploadOptions),
    /// `rt dl`.
    Download(DownloadOptions),
    /// `rt sp`.
    SetProperties(PropertiesOptions),
    /// `rt delp`.
    DeleteProperties(PropertiesOptions),
    /// `rt mv`.
    Move(DryRunOptions),
    /// `rt cp`.
    Copy(DryRunOptions),
    /// `rt del`.
    Delete(DryRunOptions),
    /// `rt dl` filtered by build.
    ResolveByDefinition(DefinitionOptions),
}

impl Operation {
    /// Returns the operation kind.
    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        match self {
            Self::Upload(_) => OperationKind::Upload,
            Self::Download(_) => OperationKind::Download,
            Self::SetProperties(_) => OperationKind::SetProperties,
            Self::DeleteProperties(_) => OperationKind::DeleteProperties,
            Self::Move(_) => OperationKind::Move,
            Self::Copy(_) => OperationKind::Copy,
            Self::Delete(_) => OperationKind::Delete,
            Self::ResolveByDefinition(_) => OperationKind::ResolveByDefinition,
        }
    }

    /// Returns whether the operation selects files through a file spec.
    #[must_use]
    pub const fn uses_file_spec(&self) -> bool {
        !matches!(self, Self::ResolveByDefinition(_))
    }

    /// Returns the operation-specific positional and flag tokens, in order.
    #[must_use]
    pub fn fragments(&self) -> Vec<CommandArg> {
        match self {
            Self::Upload(options) => upload_fragments(options),
            Self::Download(options) => download_fragments(options),
            Self::SetProperties(options) | Self::DeleteProperties(options) => {
                vec![CommandArg::positional(&options.properties)]
            }
            Self::Move(options) | Self::Copy(options) | Self::Delete(options) => {
                params::switch_if(options.dry_run, "dry-run")
                    .into_iter()
                    .collect()
            }
            Self::ResolveByDefinition(options) => vec![
                CommandArg::positional("*"),
                CommandArg::positional(&options.download_path),
                CommandArg::value("build", options.build_filter()),
                CommandArg::switch("flat"),
                CommandArg::switch("fail-no-op"),
            ],
        }
    }
}

fn upload_fragments(options: &UploadOptions) -> Vec<CommandArg> {
    let mut fragments: Vec<CommandArg> = options
        .build_info
        .iter()
        .flat_map(|build_info| build_info.fragments())
        .collect();
    fragments.extend(params::switch_if(options.dry_run, "dry-run"));
    fragments.extend(params::switch_if(options.preserve_symlinks, "symlinks"));
    fragments.extend(
        options
            .debian
            .as_ref()
            .map(|triple| CommandArg::value("deb", triple.flag_value())),
    );
    fragments.extend(params::value_if(
        options.sync_deletes.as_deref(),
        "sync-deletes",
    ));
    fragments
}

fn download_fragments(options: &DownloadOptions) -> Vec<CommandArg> {
    let mut fragments: Vec<CommandArg> = options
        .build_info
        .iter()
        .flat_map(|build_info| build_info.fragments())
        .collect();
    fragments.extend(params::switch_if(options.dry_run, "dry-run"));
    fragments.extend(
        options
            .split_count
            .map(|value| params::integer_value(value, "split-count")),
    );
    fragments.extend(
        options
            .min_split
            .map(|value| params::integer_value(value, "min-split")),
    );
    fragments.extend(params::switch_if(
        options.validate_symlinks,
        "validate-symlinks",
    ));
    fragments.extend(params::value_if(
        options.sync_deletes.as_deref(),
        "sync-deletes",
    ));
    fragments
}
