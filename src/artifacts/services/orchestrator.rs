//! End-to-end orchestration of one task invocation.

use super::{
    dispatch::build_command,
    lifecycle::{ServerLease, ServerLifecycleError, ServerLifecycleService},
    request::{InvocationContext, TaskRequest, parse_context, parse_request},
};
use crate::artifacts::{
    domain::{
        ExecutionOutcome, FileSpec, InputError, OperationKind, SpecSource, TaskStage,
        spec_file_name,
    },
    ports::{CliInvocation, CliRunner, CliRunnerError, SpecWorkspace, SpecWorkspaceError, TaskInputs},
};
use crate::config::{LEGACY_SUCCESS_MESSAGE, TaskSettings};
use camino::{Utf8Path, Utf8PathBuf};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Failure of one invocation, tagged with the stage that produced it.
#[derive(Debug, Clone, Error)]
pub enum GenericTaskError {
    /// Inputs were missing or malformed.
    #[error(transparent)]
    Configuration(#[from] InputError),

    /// The server profile could not be registered.
    #[error(transparent)]
    Registration(ServerLifecycleError),

    /// The temporary file spec could not be written.
    #[error(transparent)]
    SpecFileWrite(SpecWorkspaceError),

    /// The repository command failed.
    #[error("{operation} failed: {source}")]
    Execution {
        /// Operation that was running.
        operation: OperationKind,
        /// Underlying CLI failure.
        source: CliRunnerError,
    },

    /// The server profile could not be removed.
    #[error(transparent)]
    ServerCleanup(ServerLifecycleError),

    /// The temporary file spec could not be deleted.
    #[error(transparent)]
    SpecFileCleanup(SpecWorkspaceError),
}

impl GenericTaskError {
    /// Returns the stage the failure is attributed to.
    #[must_use]
    pub const fn stage(&self) -> TaskStage {
        match self {
            Self::Configuration(_) => TaskStage::Configuration,
            Self::Registration(_) => TaskStage::Registration,
            Self::SpecFileWrite(_) | Self::Execution { .. } => TaskStage::Execution,
            Self::ServerCleanup(_) | Self::SpecFileCleanup(_) => TaskStage::Cleanup,
        }
    }
}

/// Result type for orchestrated invocations.
pub type GenericTaskResult<T> = Result<T, GenericTaskError>;

/// Number of successive millisecond stamps tried when a spec file name is
/// already taken in the working directory.
const SPEC_FILE_NAME_ATTEMPTS: i64 = 16;

/// Resources acquired by an invocation that must be released before it
/// reports.
struct InvocationResources {
    lease: ServerLease,
    spec_file: Option<Utf8PathBuf>,
}

/// Runs one generic artifact operation from raw inputs to a single outcome.
#[derive(Clone)]
pub struct GenericArtifactsService<R, W, C>
where
    R: CliRunner,
    W: SpecWorkspace,
    C: Clock + Send + Sync,
{
    runner: Arc<R>,
    workspace: Arc<W>,
    clock: Arc<C>,
    settings: Arc<TaskSettings>,
    lifecycle: ServerLifecycleService<R, C>,
}

impl<R, W, C> GenericArtifactsService<R, W, C>
where
    R: CliRunner,
    W: SpecWorkspace,
    C: Clock + Send + Sync,
{
    /// Creates a new orchestration service.
    #[must_use]
    pub fn new(runner: Arc<R>, workspace: Arc<W>, clock: Arc<C>, settings: TaskSettings) -> Self {
        let shared_settings = Arc::new(settings);
        let lifecycle = ServerLifecycleService::new(
            Arc::clone(&runner),
            Arc::clone(&clock),
            Arc::clone(&shared_settings),
        );
        Self {
            runner,
            workspace,
            clock,
            settings: shared_settings,
            lifecycle,
        }
    }

    /// Runs the invocation and folds every result into one outcome.
    pub async fn run(&self, inputs: &impl TaskInputs) -> ExecutionOutcome {
        match self.execute(inputs).await {
            Ok(kind) => {
                let message = if self.settings.legacy_success_message() {
                    LEGACY_SUCCESS_MESSAGE
                } else {
                    kind.success_message()
                };
                info!(operation = %kind, "operation succeeded");
                ExecutionOutcome::success(message)
            }
            Err(err) => {
                let stage = err.stage();
                warn!(stage = %stage, error = %err, "operation failed");
                ExecutionOutcome::failure(stage, format!("{stage} failed: {err}"))
            }
        }
    }

    /// Runs the invocation and returns the kind of operation performed.
    ///
    /// The server profile is unregistered and any written spec file is
    /// deleted on every path once registration has succeeded. A failure
    /// of the operation itself takes precedence over cleanup failures,
    /// which are then only logged.
    ///
    /// # Errors
    ///
    /// Returns [`GenericTaskError`] describing the first failure by
    /// precedence.
    pub async fn execute(&self, inputs: &impl TaskInputs) -> GenericTaskResult<OperationKind> {
        let context = parse_context(inputs)?;
        let request = parse_request(inputs, &self.settings)?;
        let kind = request.operation().kind();
        debug!(operation = %kind, "parsed task request");

        let lease = self
            .lifecycle
            .register(&context)
            .await
            .map_err(GenericTaskError::Registration)?;
        let mut resources = InvocationResources {
            lease,
            spec_file: None,
        };

        let primary = self.perform(&context, &request, &mut resources).await;
        let cleanup = self.release(resources).await;

        match (primary, cleanup) {
            (Ok(()), Ok(())) => Ok(kind),
            (Ok(()), Err(cleanup_err)) => Err(cleanup_err),
            (Err(primary_err), Ok(())) => Err(primary_err),
            (Err(primary_err), Err(cleanup_err)) => {
                warn!(error = %cleanup_err, "cleanup failed after operation failure");
                Err(primary_err)
            }
        }
    }

    async fn perform(
        &self,
        context: &InvocationContext,
        request: &TaskRequest,
        resources: &mut InvocationResources,
    ) -> GenericTaskResult<()> {
        let spec_path = match request.common().map(|common| &common.spec) {
            Some(SpecSource::TaskConfiguration(spec)) => Some(self.write_spec_file(
                context.working_directory(),
                spec,
                resources,
            )?),
            Some(SpecSource::File(path)) => Some(path.clone()),
            None => None,
        };

        let kind = request.operation().kind();
        let command = build_command(
            &self.settings,
            request,
            resources.lease.server_id(),
            spec_path.as_deref(),
        );
        info!(
            operation = %kind,
            server_id = %resources.lease.server_id(),
            command = %command,
            "running repository command"
        );

        let output = self
            .runner
            .run(&CliInvocation::new(command, context.working_directory()))
            .await
            .map_err(|source| GenericTaskError::Execution {
                operation: kind,
                source,
            })?;
        debug!(operation = %kind, stdout = %output.stdout, "repository command finished");
        Ok(())
    }

    /// Creates a fresh `genericSpec<millis>.json`, moving on to the next
    /// millisecond while names are taken by concurrent invocations. A file
    /// this invocation created is recorded for cleanup even when writing its
    /// contents fails; a colliding file is never recorded.
    fn write_spec_file(
        &self,
        directory: &Utf8Path,
        spec: &FileSpec,
        resources: &mut InvocationResources,
    ) -> GenericTaskResult<Utf8PathBuf> {
        let base = self.clock.utc().timestamp_millis();
        let mut offset = 0;
        loop {
            let file_name = spec_file_name(base.saturating_add(offset));
            match self.workspace.write_spec(directory, &file_name, spec.as_str()) {
                Ok(path) => {
                    resources.spec_file = Some(path.clone());
                    return Ok(path);
                }
                Err(err) if err.is_collision() && offset + 1 < SPEC_FILE_NAME_ATTEMPTS => {
                    debug!(path = %err.path(), "file spec name taken, trying the next one");
                    offset += 1;
                }
                Err(err) => {
                    if !err.is_collision() {
                        resources.spec_file = Some(err.path().to_owned());
                    }
                    return Err(GenericTaskError::SpecFileWrite(err));
                }
            }
        }
    }

    async fn release(&self, resources: InvocationResources) -> GenericTaskResult<()> {
        let InvocationResources { lease, spec_file } = resources;
        let server = self
            .lifecycle
            .unregister(lease)
            .await
            .map_err(GenericTaskError::ServerCleanup);
        let spec = spec_file.map_or(Ok(()), |path| {
            debug!(path = %path, "deleting file spec");
            self.workspace
                .remove_spec(&path)
                .map_err(GenericTaskError::SpecFileCleanup)
        });

        match (server, spec) {
            (Err(server_err), Err(spec_err)) => {
                warn!(error = %spec_err, "file spec cleanup failed");
                Err(server_err)
            }
            (Err(err), Ok(())) | (Ok(()), Err(err)) => Err(err),
            (Ok(()), Ok(())) => Ok(()),
        }
    }
}
