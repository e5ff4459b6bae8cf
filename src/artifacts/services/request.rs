//! Translation of raw host inputs into a validated task request.
//!
//! Everything in here runs before any resource is acquired, so every error
//! is a configuration error.

use crate::artifacts::{
    domain::{
        BuildInfo, CommonOptions, ConnectionDetails, Credentials, DebianTriple, DefinitionOptions,
        DownloadOptions, DryRunOptions, FileSpec, InputError, Operation, OperationKind,
        PropertiesOptions, SpecSource, UploadOptions,
        params::{parse_bool, parse_integer, parse_optional, parse_required},
    },
    ports::TaskInputs,
};
use crate::config::TaskSettings;
use camino::{Utf8Path, Utf8PathBuf};

const CONNECTION: &str = "connection";
const DEFINITION: &str = "definition";
const COMMAND: &str = "command";
const VERSION: &str = "version";
const DOWNLOAD_PATH: &str = "downloadPath";
const PROJECT_KEY: &str = "projectKey";
const WORKING_DIRECTORY: &str = "System.DefaultWorkingDirectory";
const RUN_ID_VARIABLES: [&str; 2] = ["Build.BuildId", "Release.ReleaseId"];

/// Per-invocation context: where and as whom the CLI runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    connection: ConnectionDetails,
    working_directory: Utf8PathBuf,
    run_id: Option<String>,
}

impl InvocationContext {
    /// Creates a context.
    #[must_use]
    pub fn new(
        connection: ConnectionDetails,
        working_directory: impl Into<Utf8PathBuf>,
        run_id: Option<String>,
    ) -> Self {
        Self {
            connection,
            working_directory: working_directory.into(),
            run_id,
        }
    }

    /// Returns the repository connection.
    #[must_use]
    pub const fn connection(&self) -> &ConnectionDetails {
        &self.connection
    }

    /// Returns the host working directory.
    #[must_use]
    pub fn working_directory(&self) -> &Utf8Path {
        &self.working_directory
    }

    /// Returns the pipeline run identifier, if the host supplied one.
    #[must_use]
    pub fn run_id(&self) -> Option<&str> {
        self.run_id.as_deref()
    }
}

/// A fully validated request for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRequest {
    operation: Operation,
    common: Option<CommonOptions>,
    project: Option<String>,
}

impl TaskRequest {
    /// Creates a request for one of the seven explicit operations.
    #[must_use]
    pub const fn generic(
        operation: Operation,
        common: CommonOptions,
        project: Option<String>,
    ) -> Self {
        Self {
            operation,
            common: Some(common),
            project,
        }
    }

    /// Creates a resolve-by-definition request.
    #[must_use]
    pub const fn resolve_by_definition(options: DefinitionOptions, project: Option<String>) -> Self {
        Self {
            operation: Operation::ResolveByDefinition(options),
            common: None,
            project,
        }
    }

    /// Returns the operation.
    #[must_use]
    pub const fn operation(&self) -> &Operation {
        &self.operation
    }

    /// Returns the shared options of explicit operations.
    #[must_use]
    pub const fn common(&self) -> Option<&CommonOptions> {
        self.common.as_ref()
    }

    /// Returns the project key.
    #[must_use]
    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }
}

fn input(inputs: &impl TaskInputs, name: &str) -> Option<String> {
    inputs.input(name)
}

fn required(inputs: &impl TaskInputs, name: &str) -> Result<String, InputError> {
    parse_required(name, input(inputs, name).as_deref())
}

fn optional(inputs: &impl TaskInputs, name: &str) -> Option<String> {
    parse_optional(input(inputs, name).as_deref())
}

fn flag(inputs: &impl TaskInputs, name: &str) -> bool {
    parse_bool(input(inputs, name).as_deref())
}

fn integer(inputs: &impl TaskInputs, name: &str) -> Result<Option<i64>, InputError> {
    parse_integer(name, input(inputs, name).as_deref())
}

/// Reads the invocation context: working directory, connection and run id.
///
/// # Errors
///
/// Returns [`InputError`] when the working directory, the connection input,
/// or the endpoint URL or credentials are missing or invalid.
pub fn parse_context(inputs: &impl TaskInputs) -> Result<InvocationContext, InputError> {
    let working_directory = parse_optional(inputs.variable(WORKING_DIRECTORY).as_deref())
        .ok_or(InputError::MissingWorkingDirectory)?;
    let connection = parse_connection(inputs)?;
    let run_id = RUN_ID_VARIABLES
        .iter()
        .find_map(|name| parse_optional(inputs.variable(name).as_deref()));

    Ok(InvocationContext::new(
        connection,
        working_directory,
        run_id,
    ))
}

fn parse_connection(inputs: &impl TaskInputs) -> Result<ConnectionDetails, InputError> {
    let endpoint_id = required(inputs, CONNECTION)?;
    let url = parse_optional(inputs.endpoint_url(&endpoint_id).as_deref())
        .ok_or_else(|| InputError::MissingEndpointUrl(endpoint_id.clone()))?;
    let parameter =
        |key: &str| parse_optional(inputs.endpoint_parameter(&endpoint_id, key).as_deref());

    let access_token = parameter("apitoken").or_else(|| parameter("accesstoken"));
    let credentials = match (access_token, parameter("username")) {
        (Some(token), _) => Credentials::AccessToken(token),
        (None, Some(username)) => Credentials::UsernamePassword {
            username,
            password: inputs
                .endpoint_parameter(&endpoint_id, "password")
                .unwrap_or_default(),
        },
        (None, None) => return Err(InputError::MissingCredentials(endpoint_id)),
    };

    ConnectionDetails::new(url, credentials)
}

/// Reads the requested operation and its options.
///
/// A non-empty `definition` input selects resolve-by-definition mode and the
/// `command` selector is not read at all.
///
/// # Errors
///
/// Returns [`InputError`] when a required input is missing, an integer input
/// is malformed, the selector is unsupported, or the file spec is invalid.
pub fn parse_request(
    inputs: &impl TaskInputs,
    settings: &TaskSettings,
) -> Result<TaskRequest, InputError> {
    let project = optional(inputs, PROJECT_KEY);

    if let Some(build_name) = optional(inputs, DEFINITION) {
        let options = parse_definition(inputs, settings, build_name)?;
        return Ok(TaskRequest::resolve_by_definition(options, project));
    }

    let selector = required(inputs, COMMAND)?;
    let kind = OperationKind::from_selector(&selector)?;
    let operation = parse_operation(inputs, kind)?;
    let common = parse_common(inputs)?;
    Ok(TaskRequest::generic(operation, common, project))
}

fn parse_definition(
    inputs: &impl TaskInputs,
    settings: &TaskSettings,
    build_name: String,
) -> Result<DefinitionOptions, InputError> {
    let override_number = parse_optional(
        inputs
            .variable(settings.build_number_override_variable())
            .as_deref(),
    );
    let build_number = override_number.map_or_else(|| required(inputs, VERSION), Ok)?;
    let download_path = required(inputs, DOWNLOAD_PATH)?;
    Ok(DefinitionOptions::new(
        build_name,
        build_number,
        &download_path,
    ))
}

fn parse_operation(inputs: &impl TaskInputs, kind: OperationKind) -> Result<Operation, InputError> {
    let dry_run = || DryRunOptions {
        dry_run: flag(inputs, "dryRun"),
    };
    let operation = match kind {
        OperationKind::Upload => Operation::Upload(UploadOptions {
            build_info: parse_build_info(inputs)?,
            dry_run: flag(inputs, "dryRun"),
            preserve_symlinks: flag(inputs, "preserveSymlinks"),
            debian: parse_debian(inputs)?,
            sync_deletes: parse_sync_deletes(inputs, "syncDeletesRemote", "syncDeletesPathRemote"),
        }),
        OperationKind::Download => Operation::Download(DownloadOptions {
            build_info: parse_build_info(inputs)?,
            dry_run: flag(inputs, "dryRun"),
            split_count: integer(inputs, "splitCount")?,
            min_split: integer(inputs, "minSplit")?,
            validate_symlinks: flag(inputs, "validateSymlinks"),
            sync_deletes: parse_sync_deletes(inputs, "syncDeletesLocal", "syncDeletesPathLocal"),
        }),
        OperationKind::SetProperties => Operation::SetProperties(PropertiesOptions {
            properties: required(inputs, "setProps")?,
        }),
        OperationKind::DeleteProperties => Operation::DeleteProperties(PropertiesOptions {
            properties: required(inputs, "deleteProps")?,
        }),
        OperationKind::Move => Operation::Move(dry_run()),
        OperationKind::Copy => Operation::Copy(dry_run()),
        OperationKind::Delete => Operation::Delete(dry_run()),
        OperationKind::ResolveByDefinition => {
            return Err(InputError::UnsupportedCommand(kind.as_str().to_owned()));
        }
    };
    Ok(operation)
}

fn parse_build_info(inputs: &impl TaskInputs) -> Result<Option<BuildInfo>, InputError> {
    if !flag(inputs, "collectBuildInfo") {
        return Ok(None);
    }
    Ok(Some(BuildInfo {
        name: required(inputs, "buildName")?,
        number: required(inputs, "buildNumber")?,
        module: optional(inputs, "module"),
    }))
}

fn parse_debian(inputs: &impl TaskInputs) -> Result<Option<DebianTriple>, InputError> {
    if !flag(inputs, "setDebianProps") {
        return Ok(None);
    }
    Ok(Some(DebianTriple::new(
        required(inputs, "debDistribution")?,
        required(inputs, "debComponent")?,
        required(inputs, "debArchitecture")?,
    )))
}

fn parse_sync_deletes(inputs: &impl TaskInputs, enabled: &str, path: &str) -> Option<String> {
    if flag(inputs, enabled) {
        optional(inputs, path)
    } else {
        None
    }
}

fn parse_common(inputs: &impl TaskInputs) -> Result<CommonOptions, InputError> {
    let spec = match optional(inputs, "specSource").as_deref() {
        None | Some("taskConfiguration") => {
            SpecSource::TaskConfiguration(FileSpec::parse(required(inputs, "fileSpec")?)?)
        }
        Some("file") => SpecSource::File(Utf8PathBuf::from(required(inputs, "file")?)),
        Some(other) => return Err(InputError::UnsupportedSpecSource(other.to_owned())),
    };
    let spec_vars = if flag(inputs, "replaceSpecVars") {
        optional(inputs, "specVars")
    } else {
        None
    };

    Ok(CommonOptions {
        spec,
        spec_vars,
        fail_no_op: flag(inputs, "failNoOp"),
        insecure_tls: flag(inputs, "insecureTls"),
    })
}
